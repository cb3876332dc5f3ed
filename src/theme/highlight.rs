//! Token highlighting
//!
//! Applies a theme to a line of already-classified tokens, as produced by
//! an external tokenizer or semantic highlighter.

use super::definition::Theme;
use super::style::Span;

/// One classified piece of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The source text of the token
    pub text: String,
    /// Scopes for this token, innermost first
    pub scopes: Vec<String>,
}

impl Token {
    /// Create a new token
    pub fn new(text: &str, scopes: &[&str]) -> Self {
        Self {
            text: text.to_string(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse a `text<TAB>scope scope ...` line
    ///
    /// A line without a tab is plain text with no scopes.
    pub fn parse_line(line: &str) -> Self {
        match line.split_once('\t') {
            Some((text, scopes)) => Self {
                text: text.to_string(),
                scopes: scopes.split_whitespace().map(str::to_string).collect(),
            },
            None => Self {
                text: line.to_string(),
                scopes: Vec::new(),
            },
        }
    }
}

/// Resolves styles for token streams against one theme
pub struct Highlighter<'a> {
    theme: &'a Theme,
}

impl<'a> Highlighter<'a> {
    /// Create a highlighter for a theme
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// The theme this highlighter uses
    pub fn theme(&self) -> &'a Theme {
        self.theme
    }

    /// Highlight a line made of consecutive tokens
    ///
    /// Span offsets are byte offsets into the concatenated token text.
    /// Adjacent tokens that resolve to the same style share one span.
    pub fn highlight_tokens(&self, tokens: &[Token]) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();
        let mut pos = 0;

        for token in tokens {
            if token.text.is_empty() {
                continue;
            }
            let style = self.theme.resolve(token.scopes.as_slice());
            let end = pos + token.text.len();

            match spans.last_mut() {
                Some(last) if last.end == pos && last.style == style => last.end = end,
                _ => spans.push(Span::new(pos, end, style)),
            }
            pos = end;
        }

        spans
    }

    /// Concatenated text of a line of tokens
    pub fn line_text(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::rules::StyleRule;
    use crate::theme::style::{Color, StyleModifier};

    fn test_theme() -> Theme {
        let mut theme = Theme::new("Test");
        theme.add_rule(StyleRule::new("keyword".parse().unwrap(), StyleModifier::fg(Color::rgb(0x89, 0xDD, 0xFF))));
        theme.add_rule(StyleRule::new("string".parse().unwrap(), StyleModifier::fg(Color::rgb(0xC3, 0xE8, 0x8D))));
        theme
    }

    #[test]
    fn test_highlight_offsets() {
        let theme = test_theme();
        let highlighter = Highlighter::new(&theme);
        let tokens = [
            Token::new("puts", &["support.function.kernel.ruby", "source.ruby"]),
            Token::new(" ", &["source.ruby"]),
            Token::new("\"héllo\"", &["string.quoted.double.ruby", "source.ruby"]),
        ];
        let spans = highlighter.highlight_tokens(&tokens);

        // "puts" and " " both fall back to defaults and coalesce
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 5));
        assert_eq!(spans[0].style, theme.defaults.resolved());
        assert_eq!((spans[1].start, spans[1].end), (5, 5 + "\"héllo\"".len()));
        assert_eq!(spans[1].style.foreground, Color::rgb(0xC3, 0xE8, 0x8D));
        assert_eq!(spans[1].end, Highlighter::line_text(&tokens).len());
    }

    #[test]
    fn test_empty_tokens_produce_no_span() {
        let theme = test_theme();
        let highlighter = Highlighter::new(&theme);
        let tokens = [
            Token::new("if", &["keyword.control.ruby"]),
            Token::new("", &["string.quoted"]),
            Token::new(" x", &[]),
        ];
        let spans = highlighter.highlight_tokens(&tokens);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[1].start, spans[1].end), (2, 4));
        assert!(highlighter.highlight_tokens(&[]).is_empty());
    }

    #[test]
    fn test_parse_line() {
        let token = Token::parse_line("def\tkeyword.control.def.ruby meta.function.method.ruby");
        assert_eq!(token.text, "def");
        assert_eq!(token.scopes, vec!["keyword.control.def.ruby", "meta.function.method.ruby"]);

        let plain = Token::parse_line("   ");
        assert_eq!(plain.text, "   ");
        assert!(plain.scopes.is_empty());
    }
}
