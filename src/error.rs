//! Error types for scopetint

use std::fmt;

use thiserror::Error;

/// Result type alias for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Theme loading and registry errors
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unsupported theme format: {0}")]
    UnsupportedFormat(String),

    #[error("No such theme: {0}")]
    UnknownTheme(String),

    #[error("Unknown theme type: {0}")]
    InvalidKind(String),

    #[error("{0}")]
    Message(String),
}

/// A malformed rule found while loading a theme document
///
/// `index` is the position of the offending entry in `tokenColors`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid rule #{index}: {reason}")]
pub struct ValidationError {
    pub index: usize,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(index: usize, reason: ValidationReason) -> Self {
        Self { index, reason }
    }
}

/// Why a rule was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// Scope string, list or one of its selectors/segments is empty
    EmptySelector(String),
    /// A key outside the known rule/settings fields
    UnknownField(String),
    /// Color is not `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`
    InvalidColor(String),
    /// Word in `fontStyle` that is not a known style
    InvalidFontStyle(String),
    /// `scope` that is neither a string nor a list of strings
    InvalidScope(String),
    /// Entry, `name` or `settings` holding the wrong kind of value
    WrongType { field: &'static str, found: String },
    /// Scope-less global settings must be a single leading entry
    MisplacedGlobalSettings,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySelector(scope) => write!(f, "empty scope selector in {scope:?}"),
            Self::UnknownField(name) => write!(f, "unknown field {name:?}"),
            Self::InvalidColor(value) => write!(f, "invalid color {value:?}"),
            Self::InvalidFontStyle(word) => write!(f, "invalid font style {word:?}"),
            Self::InvalidScope(value) => write!(f, "scope must be a string or list of strings, found {value}"),
            Self::WrongType { field, found } => write!(f, "{field} has the wrong type: {found}"),
            Self::MisplacedGlobalSettings => {
                write!(f, "global settings (no scope) must be the single first entry")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_index() {
        let err = ValidationError::new(3, ValidationReason::UnknownField("colour".into()));
        let msg = err.to_string();
        assert!(msg.contains("#3"));
        assert!(msg.contains("colour"));
    }

    #[test]
    fn test_validation_converts_to_theme_error() {
        let err: ThemeError = ValidationError::new(0, ValidationReason::MisplacedGlobalSettings).into();
        assert!(matches!(err, ThemeError::Validation(ref v) if v.index == 0));
        assert!(err.to_string().starts_with("invalid rule #0"));
    }

    #[test]
    fn test_scope_reason_shows_value() {
        let err = ValidationError::new(1, ValidationReason::InvalidScope("5".into()));
        assert_eq!(
            err.to_string(),
            "invalid rule #1: scope must be a string or list of strings, found 5"
        );
    }
}
