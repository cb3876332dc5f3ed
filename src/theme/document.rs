//! Theme document loading
//!
//! Reads VS Code style color theme documents, either as JSON or as the
//! equivalent TOML layout:
//!
//! ```toml
//! name = "Palenight"
//! type = "dark"
//!
//! [colors]
//! "editor.foreground" = "#A6ACCD"
//!
//! [[tokenColors]]
//! scope = ["keyword", "storage.type"]
//! settings = { foreground = "#C792EA", fontStyle = "italic" }
//! ```
//!
//! Every `tokenColors` entry is validated; the first malformed entry
//! fails the whole document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Result, ThemeError, ValidationError, ValidationReason};

use super::definition::{Theme, ThemeKind};
use super::rules::{RuleSet, StyleRule};
use super::selector::ScopeSelectors;
use super::style::{Color, DefaultStyle, FontStyle, StyleModifier};

/// Name used when neither the document nor its path provides one
const UNTITLED: &str = "untitled";

/// Raw document as deserialized, before validation
#[derive(Debug, Deserialize)]
struct ThemeDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
    #[serde(default, rename = "tokenColors")]
    token_colors: Vec<Value>,
}

/// One `tokenColors` entry
///
/// Fields stay untyped until validation so a wrong-typed value is reported
/// against the entry's index instead of as a parse error.
#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    scope: Option<Value>,
    #[serde(default)]
    settings: Option<Value>,
    #[serde(flatten)]
    unknown: BTreeMap<String, IgnoredAny>,
}

impl Theme {
    /// Parse a JSON theme document
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let document: ThemeDocument = serde_json::from_str(contents)?;
        document.into_theme(None)
    }

    /// Parse a TOML theme document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let document: ThemeDocument = toml::from_str(contents)?;
        document.into_theme(None)
    }

    /// Load a theme document, picking the format from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let contents = match extension.as_deref() {
            Some("json") | Some("toml") => fs::read_to_string(path)?,
            _ => return Err(ThemeError::UnsupportedFormat(path.display().to_string())),
        };

        let document: ThemeDocument = if extension.as_deref() == Some("toml") {
            toml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };

        let stem = path.file_stem().and_then(|s| s.to_str());
        let theme = document.into_theme(stem)?;
        info!(name = %theme.name, path = %path.display(), rules = theme.rules.len(), "loaded theme");
        Ok(theme)
    }
}

impl ThemeDocument {
    /// Validate every rule and build the theme
    fn into_theme(self, fallback_name: Option<&str>) -> Result<Theme> {
        let kind = match self.kind.as_deref() {
            Some(kind) => kind.parse::<ThemeKind>()?,
            None => ThemeKind::default(),
        };

        let mut defaults = DefaultStyle::default();
        if let Some(color) = chrome_color(&self.colors, "editor.foreground") {
            defaults.foreground = color;
        }
        if let Some(color) = chrome_color(&self.colors, "editor.background") {
            defaults.background = color;
        }

        let mut rules = RuleSet::default();
        for (index, entry) in self.token_colors.into_iter().enumerate() {
            let raw = parse_entry(entry).map_err(|reason| ValidationError::new(index, reason))?;
            if let Some(field) = raw.unknown.keys().next() {
                return Err(ValidationError::new(index, ValidationReason::UnknownField(field.clone())).into());
            }
            let name = parse_name(raw.name).map_err(|reason| ValidationError::new(index, reason))?;
            let style = parse_settings(raw.settings.as_ref()).map_err(|reason| ValidationError::new(index, reason))?;

            let Some(scope) = raw.scope else {
                // TextMate global settings: a leading entry without a scope
                if index != 0 {
                    return Err(ValidationError::new(index, ValidationReason::MisplacedGlobalSettings).into());
                }
                if let Some(font_style) = style.font_style {
                    warn!(index, font_style = %font_style, "ignoring fontStyle in global settings entry");
                }
                defaults.foreground = style.foreground.unwrap_or(defaults.foreground);
                defaults.background = style.background.unwrap_or(defaults.background);
                continue;
            };

            let selectors = parse_scope(&scope).map_err(|reason| ValidationError::new(index, reason))?;

            rules.push(StyleRule { name, selectors, style });
        }

        let name = self
            .name
            .or_else(|| fallback_name.map(str::to_string))
            .unwrap_or_else(|| UNTITLED.to_string());
        debug!(theme = %name, rules = rules.len(), "validated theme document");

        Ok(Theme {
            name,
            kind,
            defaults,
            colors: self.colors,
            rules,
        })
    }
}

/// Parse a default color from the chrome colors, ignoring bad values
fn chrome_color(colors: &BTreeMap<String, String>, key: &str) -> Option<Color> {
    let value = colors.get(key)?;
    let color = Color::parse(value);
    if color.is_none() {
        warn!(key, value = %value, "ignoring unparseable editor color");
    }
    color
}

/// Check that a `tokenColors` entry is a table before reading its fields
fn parse_entry(entry: Value) -> std::result::Result<RawRule, ValidationReason> {
    if !entry.is_object() {
        return Err(wrong_type("entry", &entry));
    }
    RawRule::deserialize(entry).map_err(|err| ValidationReason::WrongType {
        field: "entry",
        found: err.to_string(),
    })
}

fn parse_name(name: Option<Value>) -> std::result::Result<Option<String>, ValidationReason> {
    match name {
        None => Ok(None),
        Some(Value::String(name)) => Ok(Some(name)),
        Some(other) => Err(wrong_type("name", &other)),
    }
}

/// A scope is a selector string or a list of them
fn parse_scope(scope: &Value) -> std::result::Result<ScopeSelectors, ValidationReason> {
    match scope {
        Value::String(scope) => scope.parse::<ScopeSelectors>(),
        Value::Array(items) => {
            let scopes = items
                .iter()
                .map(|item| item.as_str().ok_or_else(|| ValidationReason::InvalidScope(item.to_string())))
                .collect::<std::result::Result<Vec<&str>, _>>()?;
            ScopeSelectors::from_list(scopes.as_slice())
        }
        other => Err(ValidationReason::InvalidScope(other.to_string())),
    }
}

/// Validate a rule's `settings` table
fn parse_settings(settings: Option<&Value>) -> std::result::Result<StyleModifier, ValidationReason> {
    let mut style = StyleModifier::default();
    let table = match settings {
        None => return Ok(style),
        Some(Value::Object(table)) => table,
        Some(other) => return Err(wrong_type("settings", other)),
    };

    for (key, value) in table {
        match key.as_str() {
            "foreground" => style.foreground = Some(parse_color(value)?),
            "background" => style.background = Some(parse_color(value)?),
            "fontStyle" => {
                let font_style = match value {
                    Value::String(words) => words.parse::<FontStyle>()?,
                    other => return Err(ValidationReason::InvalidFontStyle(other.to_string())),
                };
                style.font_style = Some(font_style);
            }
            other => return Err(ValidationReason::UnknownField(other.to_string())),
        }
    }
    Ok(style)
}

fn parse_color(value: &Value) -> std::result::Result<Color, ValidationReason> {
    match value {
        Value::String(hex) => hex.parse::<Color>(),
        other => Err(ValidationReason::InvalidColor(other.to_string())),
    }
}

fn wrong_type(field: &'static str, found: &Value) -> ValidationReason {
    ValidationReason::WrongType {
        field,
        found: found.to_string(),
    }
}
