//! Theme definitions
//!
//! This module provides the Theme struct that combines the validated
//! rule set, the global default colors and the pass-through editor
//! chrome colors of a color theme.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ThemeError;

use super::resolver;
use super::rules::{RuleMatch, RuleSet, StyleRule};
use super::style::{DefaultStyle, ResolvedStyle};

/// Theme base appearance, from the document's `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    HighContrast,
    HighContrastLight,
}

impl ThemeKind {
    /// Get the document name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
            ThemeKind::HighContrast => "hc",
            ThemeKind::HighContrastLight => "hcLight",
        }
    }
}

impl FromStr for ThemeKind {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" | "vs-dark" => Ok(ThemeKind::Dark),
            "light" | "vs" => Ok(ThemeKind::Light),
            "hc" | "hcDark" | "hc-black" => Ok(ThemeKind::HighContrast),
            "hcLight" | "hc-light" => Ok(ThemeKind::HighContrastLight),
            other => Err(ThemeError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A loaded, validated color theme
///
/// Immutable once built; share it by reference across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Theme name (e.g., "Palenight")
    pub name: String,
    /// Base appearance
    pub kind: ThemeKind,
    /// Global foreground and background
    pub defaults: DefaultStyle,
    /// Editor chrome colors, passed through unresolved
    pub colors: BTreeMap<String, String>,
    /// Token style rules in declaration order
    pub rules: RuleSet,
}

impl Theme {
    /// Create a new empty theme with fallback defaults
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ThemeKind::default(),
            defaults: DefaultStyle::default(),
            colors: BTreeMap::new(),
            rules: RuleSet::default(),
        }
    }

    /// Builder: set the default colors
    pub fn with_defaults(mut self, defaults: DefaultStyle) -> Self {
        self.defaults = defaults;
        self
    }

    /// Add a rule after all existing ones
    pub fn add_rule(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    /// Look up an editor chrome color by key (e.g. `editor.background`)
    pub fn color(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }

    /// Resolve the style for a token's scopes, innermost first
    pub fn resolve<S: AsRef<str>>(&self, token_scopes: &[S]) -> ResolvedStyle {
        resolver::resolve(token_scopes, &self.rules, &self.defaults)
    }

    /// The rule that styles a token, for diagnostics
    pub fn winning_rule<S: AsRef<str>>(&self, token_scopes: &[S]) -> Option<RuleMatch<'_>> {
        resolver::winning_rule(token_scopes, &self.rules)
    }
}
