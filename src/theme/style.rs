//! Style types for themed text
//!
//! This module provides the color and font-style values carried by
//! theme rules, and the resolved style handed to a renderer.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationReason;

/// Hex color pattern accepted in theme documents
const HEX_COLOR: &str = r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$";

fn hex_color_regex() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(HEX_COLOR).ok()).as_ref()
}

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`
    pub fn parse(s: &str) -> Option<Self> {
        if !hex_color_regex()?.is_match(s) {
            return None;
        }
        let digits: Vec<u8> = s[1..]
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()?;

        let (r, g, b, a) = match digits.len() {
            3 | 4 => {
                // #RGB expands each nibble: #f80 == #ff8800
                let alpha = digits.get(3).map_or(0xFF, |d| d * 17);
                (digits[0] * 17, digits[1] * 17, digits[2] * 17, alpha)
            }
            6 | 8 => {
                let pair = |i: usize| digits[i] * 16 + digits[i + 1];
                let alpha = if digits.len() == 8 { pair(6) } else { 0xFF };
                (pair(0), pair(2), pair(4), alpha)
            }
            _ => return None,
        };
        Some(Self { r, g, b, a })
    }

    /// Check whether the color has no transparency
    pub fn is_opaque(&self) -> bool {
        self.a == 0xFF
    }
}

impl FromStr for Color {
    type Err = ValidationReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationReason::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

/// Font style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle {
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Struck-through text
    pub strikethrough: bool,
}

impl FontStyle {
    /// No attributes set
    pub const NONE: FontStyle = FontStyle {
        bold: false,
        italic: false,
        underline: false,
        strikethrough: false,
    };

    /// Parse a space-separated `fontStyle` value
    ///
    /// An empty string is an explicit "no style". `normal` and `regular`
    /// are accepted and add nothing. Returns the offending word on error.
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut style = Self::default();
        for word in s.split_whitespace() {
            match word {
                "bold" => style.bold = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                "strikethrough" => style.strikethrough = true,
                "normal" | "regular" => {}
                other => return Err(other.to_string()),
            }
        }
        Ok(style)
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Builder: set strikethrough
    pub fn with_strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    /// Check if no attribute is set
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl FromStr for FontStyle {
    type Err = ValidationReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map_err(ValidationReason::InvalidFontStyle)
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = [
            (self.bold, "bold"),
            (self.italic, "italic"),
            (self.underline, "underline"),
            (self.strikethrough, "strikethrough"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, word)| *word)
        .collect();
        f.write_str(&words.join(" "))
    }
}

/// The `settings` of a single rule; unset fields fall back to theme defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleModifier {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub font_style: Option<FontStyle>,
}

impl StyleModifier {
    /// Create a modifier with just a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            foreground: Some(color),
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Builder: set font style
    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    /// Apply this modifier over the theme defaults
    pub fn over(&self, defaults: &DefaultStyle) -> ResolvedStyle {
        ResolvedStyle {
            foreground: self.foreground.unwrap_or(defaults.foreground),
            background: self.background.unwrap_or(defaults.background),
            font_style: self.font_style.unwrap_or_default(),
        }
    }
}

/// Global colors a theme always defines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultStyle {
    pub foreground: Color,
    pub background: Color,
}

impl DefaultStyle {
    /// Foreground used when a document defines none
    pub const FALLBACK_FOREGROUND: Color = Color::rgb(0xD4, 0xD4, 0xD4);
    /// Background used when a document defines none
    pub const FALLBACK_BACKGROUND: Color = Color::rgb(0x1E, 0x1E, 0x1E);

    /// The resolved style for tokens no rule claims
    pub fn resolved(&self) -> ResolvedStyle {
        ResolvedStyle {
            foreground: self.foreground,
            background: self.background,
            font_style: FontStyle::NONE,
        }
    }
}

impl Default for DefaultStyle {
    fn default() -> Self {
        Self {
            foreground: Self::FALLBACK_FOREGROUND,
            background: Self::FALLBACK_BACKGROUND,
        }
    }
}

/// The final style applied to a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedStyle {
    pub foreground: Color,
    pub background: Color,
    pub font_style: FontStyle,
}

/// A styled span of text within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Style to apply to this span
    pub style: ResolvedStyle,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: ResolvedStyle) -> Self {
        Self { start, end, style }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
