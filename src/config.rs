//! Configuration file support
//!
//! Loads settings from ~/.scopetint.conf (or %USERPROFILE%\.scopetint.conf on Windows)
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # scopetint configuration
//! theme = ~/themes/palenight.json
//! color-mode = truecolor
//! show-scopes = true
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::render::ColorMode;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Theme file path or bundled theme name
    pub theme: Option<String>,
    /// How colors are written to the terminal
    pub color_mode: ColorMode,
    /// Whether `resolve` reports the winning rule
    pub show_scopes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            color_mode: ColorMode::TrueColor,
            show_scopes: false,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".scopetint.conf"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".scopetint.conf"))
        }
    }

    /// Load configuration from file
    ///
    /// A missing or unreadable file leaves the defaults in place.
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            if let Ok(contents) = fs::read_to_string(&path) {
                debug!(path = %path.display(), "read config file");
                let settings = Self::parse(&contents);
                config.apply(&settings);
            }
        }

        config
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key = value
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.insert(key, value);
            }
        }

        settings
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        if let Some(value) = settings.get("theme") {
            if !value.is_empty() {
                self.theme = Some(expand_home(value));
            }
        }

        if let Some(value) = settings.get("color-mode") {
            match value.parse::<ColorMode>() {
                Ok(mode) => self.color_mode = mode,
                Err(err) => warn!(%err, "ignoring color-mode setting"),
            }
        }

        if let Some(value) = settings.get("show-scopes") {
            self.show_scopes = parse_bool(value);
        }
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(value: &str) -> String {
    match (value.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => PathBuf::from(home).join(rest).display().to_string(),
        _ => value.to_string(),
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}
