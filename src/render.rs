//! Terminal rendering of styled spans using crossterm

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::error::{Result, ThemeError};
use crate::theme::{Color, ResolvedStyle, Span};

/// How colors are sent to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 24-bit RGB escapes
    #[default]
    TrueColor,
    /// Nearest color of the 16-color ANSI palette
    Ansi16,
}

impl FromStr for ColorMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => Ok(ColorMode::TrueColor),
            "ansi" | "ansi16" | "16" => Ok(ColorMode::Ansi16),
            other => Err(ThemeError::Message(format!("unknown color mode: {other}"))),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::TrueColor => f.write_str("truecolor"),
            ColorMode::Ansi16 => f.write_str("ansi"),
        }
    }
}

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    /// xterm default palette values
    const PALETTE: [(AnsiColor, (u8, u8, u8)); 16] = [
        (AnsiColor::Black, (0, 0, 0)),
        (AnsiColor::Red, (205, 0, 0)),
        (AnsiColor::Green, (0, 205, 0)),
        (AnsiColor::Yellow, (205, 205, 0)),
        (AnsiColor::Blue, (0, 0, 238)),
        (AnsiColor::Magenta, (205, 0, 205)),
        (AnsiColor::Cyan, (0, 205, 205)),
        (AnsiColor::White, (229, 229, 229)),
        (AnsiColor::BrightBlack, (127, 127, 127)),
        (AnsiColor::BrightRed, (255, 0, 0)),
        (AnsiColor::BrightGreen, (0, 255, 0)),
        (AnsiColor::BrightYellow, (255, 255, 0)),
        (AnsiColor::BrightBlue, (92, 92, 255)),
        (AnsiColor::BrightMagenta, (255, 0, 255)),
        (AnsiColor::BrightCyan, (0, 255, 255)),
        (AnsiColor::BrightWhite, (255, 255, 255)),
    ];

    /// Closest palette entry by squared RGB distance
    pub fn nearest(color: Color) -> Self {
        let distance = |(r, g, b): (u8, u8, u8)| {
            let dr = i32::from(color.r) - i32::from(r);
            let dg = i32::from(color.g) - i32::from(g);
            let db = i32::from(color.b) - i32::from(b);
            dr * dr + dg * dg + db * db
        };
        Self::PALETTE
            .iter()
            .min_by_key(|(_, rgb)| distance(*rgb))
            .map_or(AnsiColor::White, |(ansi, _)| *ansi)
    }

    fn to_crossterm(self) -> style::Color {
        match self {
            AnsiColor::Black => style::Color::Black,
            AnsiColor::Red => style::Color::DarkRed,
            AnsiColor::Green => style::Color::DarkGreen,
            AnsiColor::Yellow => style::Color::DarkYellow,
            AnsiColor::Blue => style::Color::DarkBlue,
            AnsiColor::Magenta => style::Color::DarkMagenta,
            AnsiColor::Cyan => style::Color::DarkCyan,
            AnsiColor::White => style::Color::Grey,
            AnsiColor::BrightBlack => style::Color::DarkGrey,
            AnsiColor::BrightRed => style::Color::Red,
            AnsiColor::BrightGreen => style::Color::Green,
            AnsiColor::BrightYellow => style::Color::Yellow,
            AnsiColor::BrightBlue => style::Color::Blue,
            AnsiColor::BrightMagenta => style::Color::Magenta,
            AnsiColor::BrightCyan => style::Color::Cyan,
            AnsiColor::BrightWhite => style::Color::White,
        }
    }
}

/// Writes resolved styles as terminal escape sequences
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    mode: ColorMode,
    /// Whether to paint span backgrounds
    background: bool,
}

impl Renderer {
    /// Create a renderer that paints foregrounds and font styles
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            background: false,
        }
    }

    /// Builder: also paint background colors
    pub fn with_background(mut self) -> Self {
        self.background = true;
        self
    }

    /// Convert a theme color for the configured mode
    pub fn terminal_color(&self, color: Color) -> style::Color {
        match self.mode {
            ColorMode::TrueColor => style::Color::Rgb {
                r: color.r,
                g: color.g,
                b: color.b,
            },
            ColorMode::Ansi16 => AnsiColor::nearest(color).to_crossterm(),
        }
    }

    /// Write `text` in `style`, resetting attributes afterwards
    pub fn write_styled<W: Write>(&self, out: &mut W, text: &str, style: &ResolvedStyle) -> Result<()> {
        queue!(out, SetForegroundColor(self.terminal_color(style.foreground)))?;
        if self.background {
            queue!(out, SetBackgroundColor(self.terminal_color(style.background)))?;
        }

        let font = style.font_style;
        if font.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if font.italic {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        if font.underline {
            queue!(out, SetAttribute(Attribute::Underlined))?;
        }
        if font.strikethrough {
            queue!(out, SetAttribute(Attribute::CrossedOut))?;
        }

        queue!(out, Print(text), SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    /// Write one line of text with its spans, followed by a newline
    ///
    /// Text outside every span is written unstyled. Spans that do not fall
    /// on character boundaries are skipped.
    pub fn write_line<W: Write>(&self, out: &mut W, line: &str, spans: &[Span]) -> Result<()> {
        let mut pos = 0;
        for span in spans {
            if span.start < pos {
                continue;
            }
            let (Some(gap), Some(text)) = (line.get(pos..span.start), line.get(span.start..span.end)) else {
                continue;
            };
            if !gap.is_empty() {
                queue!(out, Print(gap))?;
            }
            self.write_styled(out, text, &span.style)?;
            pos = span.end;
        }
        if let Some(rest) = line.get(pos..) {
            queue!(out, Print(rest))?;
        }
        queue!(out, Print("\n"))?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{DefaultStyle, FontStyle};

    fn styled(fg: Color, font_style: FontStyle) -> ResolvedStyle {
        ResolvedStyle {
            foreground: fg,
            background: DefaultStyle::FALLBACK_BACKGROUND,
            font_style,
        }
    }

    fn render(renderer: Renderer, line: &str, spans: &[Span]) -> String {
        let mut out = Vec::new();
        renderer.write_line(&mut out, line, spans).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_color_mode_parse() {
        assert_eq!("truecolor".parse::<ColorMode>().unwrap(), ColorMode::TrueColor);
        assert_eq!("ANSI".parse::<ColorMode>().unwrap(), ColorMode::Ansi16);
        assert!("256".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_nearest_ansi() {
        assert_eq!(AnsiColor::nearest(Color::rgb(0, 0, 0)), AnsiColor::Black);
        assert_eq!(AnsiColor::nearest(Color::rgb(250, 250, 250)), AnsiColor::BrightWhite);
        assert_eq!(AnsiColor::nearest(Color::rgb(0x20, 0xD0, 0xE0)), AnsiColor::Cyan);
        // pale blues land on grey rather than cyan
        assert_eq!(AnsiColor::nearest(Color::rgb(0x89, 0xDD, 0xFF)), AnsiColor::White);
        assert_eq!(AnsiColor::nearest(Color::rgb(0xF0, 0x20, 0x20)), AnsiColor::BrightRed);
    }

    #[test]
    fn test_truecolor_line() {
        let style = styled(Color::rgb(0x89, 0xDD, 0xFF), FontStyle::default().with_bold());
        let output = render(Renderer::new(ColorMode::TrueColor), "if x", &[Span::new(0, 2, style)]);

        assert!(output.contains("137;221;255"));
        assert!(output.contains("\x1b[1m"));
        assert!(output.contains("if"));
        assert!(output.ends_with(" x\n"));
        // background not painted unless requested
        assert!(!output.contains("30;30;30"));
        assert!(!output.contains("\x1b[9m"));

        let struck = styled(Color::rgb(0x67, 0x6E, 0x95), FontStyle::default().with_italic().with_strikethrough());
        let output = render(Renderer::new(ColorMode::TrueColor), "old", &[Span::new(0, 3, struck)]);
        assert!(output.contains("\x1b[3m"));
        assert!(output.contains("\x1b[9m"));
        assert!(!output.contains("\x1b[1m"));
    }

    #[test]
    fn test_background_and_ansi_mode() {
        let style = styled(Color::rgb(0x89, 0xDD, 0xFF), FontStyle::NONE);
        let output = render(
            Renderer::new(ColorMode::Ansi16).with_background(),
            "x",
            &[Span::new(0, 1, style)],
        );
        assert!(!output.contains("38;2;"));
        assert!(!output.contains("48;2;"));
        assert!(output.contains('x'));
    }

    #[test]
    fn test_unstyled_gaps_and_bad_spans() {
        let style = styled(Color::rgb(255, 0, 0), FontStyle::NONE);
        // 1..2 splits the two-byte 'é'
        let output = render(
            Renderer::new(ColorMode::TrueColor),
            "é ok",
            &[Span::new(1, 2, style), Span::new(3, 5, style)],
        );
        assert!(output.starts_with("é "));
        assert!(output.contains("ok"));
        assert_eq!(output.matches("255;0;0").count(), 1);
    }
}
