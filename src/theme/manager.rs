//! Theme registry
//!
//! This module provides the ThemeManager that holds the bundled and
//! user-loaded themes and tracks which one is active.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ThemeError};

use super::builtin;
use super::definition::Theme;

/// Registry of available themes
pub struct ThemeManager {
    /// Loaded themes by name
    themes: HashMap<String, Theme>,
    /// Name of the active theme
    active: Option<String>,
}

impl ThemeManager {
    /// Create a new theme manager with the built-in themes
    ///
    /// The first bundled theme becomes active.
    pub fn new() -> Self {
        let mut manager = Self::empty();
        for theme in builtin::all_themes() {
            manager.add_theme(theme);
        }
        manager
    }

    /// Create a manager with no themes at all
    pub fn empty() -> Self {
        Self {
            themes: HashMap::new(),
            active: None,
        }
    }

    /// Add a theme, replacing any theme with the same name
    ///
    /// Becomes active if nothing is active yet.
    pub fn add_theme(&mut self, theme: Theme) {
        let name = theme.name.clone();
        debug!(theme = %name, "registered theme");
        if self.active.is_none() {
            self.active = Some(name.clone());
        }
        self.themes.insert(name, theme);
    }

    /// Load a theme document from disk and register it
    ///
    /// Returns the registered theme name.
    pub fn load_file(&mut self, path: &Path) -> Result<String> {
        let theme = Theme::load(path)?;
        let name = theme.name.clone();
        self.add_theme(theme);
        Ok(name)
    }

    /// Activate a registered theme by name, or load and activate a theme file
    ///
    /// A value that names neither a theme nor an existing file is reported
    /// as an unknown theme.
    pub fn select(&mut self, name_or_path: &str) -> Result<&Theme> {
        let name = if self.themes.contains_key(name_or_path) {
            name_or_path.to_string()
        } else {
            let path = Path::new(name_or_path);
            if !path.exists() {
                return Err(ThemeError::UnknownTheme(name_or_path.to_string()));
            }
            self.load_file(path)?
        };
        self.set_active(&name)?;
        self.active().ok_or(ThemeError::UnknownTheme(name))
    }

    /// Get a theme by name
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Make a registered theme the active one
    pub fn set_active(&mut self, name: &str) -> Result<()> {
        if !self.themes.contains_key(name) {
            return Err(ThemeError::UnknownTheme(name.to_string()));
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    /// The active theme, if any theme is registered
    pub fn active(&self) -> Option<&Theme> {
        self.active.as_deref().and_then(|name| self.themes.get(name))
    }

    /// List available themes
    pub fn list_themes(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.themes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}
