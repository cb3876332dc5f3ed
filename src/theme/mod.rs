//! Theme and scope resolution module
//!
//! This module provides the scope-based theming infrastructure:
//! - Selector matching and specificity
//! - Style rule resolution for classified tokens
//! - Theme document loading and validation
//! - Token-stream highlighting and the theme registry

mod builtin;
mod definition;
mod document;
mod highlight;
mod manager;
mod resolver;
mod rules;
mod selector;
mod style;

pub use definition::{Theme, ThemeKind};
pub use highlight::{Highlighter, Token};
pub use manager::ThemeManager;
pub use resolver::{resolve, winning_rule};
pub use rules::{RuleMatch, RuleSet, StyleRule};
pub use selector::{ScopePath, ScopeSelector, ScopeSelectors};
pub use style::{Color, DefaultStyle, FontStyle, ResolvedStyle, Span, StyleModifier};
