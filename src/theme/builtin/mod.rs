//! Built-in themes
//!
//! Theme documents bundled into the binary.

use tracing::warn;

use super::definition::Theme;

/// Bundled JSON documents, by source file name
const BUNDLED: &[(&str, &str)] = &[("palenight.json", include_str!("palenight.json"))];

/// Get all built-in themes
///
/// A bundled document that fails validation is skipped with a warning.
pub fn all_themes() -> Vec<Theme> {
    BUNDLED
        .iter()
        .filter_map(|(file, contents)| match Theme::from_json_str(contents) {
            Ok(theme) => Some(theme),
            Err(err) => {
                warn!(file, error = %err, "skipping bundled theme");
                None
            }
        })
        .collect()
}
