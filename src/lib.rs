//! scopetint - scope-based editor theme resolution
//!
//! Maps the scopes an external tokenizer assigns to source text onto the
//! styles of a VS Code style color theme, choosing one rule per token by
//! selector specificity and declaration order.

pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod theme;

pub use error::{Result, ThemeError, ValidationError, ValidationReason};
pub use theme::{ResolvedStyle, Theme, ThemeManager};
