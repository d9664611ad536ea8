//! Comment-preserving edits to a TOML config file

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use toml_edit::{table, value, Array, DocumentMut, InlineTable};
use tracing::info;

use super::error::ConfigError;
use super::loader::Format;
use crate::constants::keys;

/// Add `variants = {}`, `plugins = []` and an empty `[theme]` table when the
/// document lacks them. Existing keys, comments and formatting are left
/// untouched. Returns the updated text and the keys that were added.
pub fn add_missing_sections(contents: &str) -> Result<(String, Vec<String>), ConfigError> {
    let mut doc = DocumentMut::from_str(contents)
        .map_err(|e| ConfigError::Syntax { format: Format::Toml, message: e.to_string() })?;

    let mut added = Vec::new();

    if !doc.as_table().contains_key(keys::VARIANTS) {
        doc[keys::VARIANTS] = value(InlineTable::new());
        added.push(keys::VARIANTS.to_string());
    }
    if !doc.as_table().contains_key(keys::PLUGINS) {
        doc[keys::PLUGINS] = value(Array::new());
        added.push(keys::PLUGINS.to_string());
    }
    if !doc.as_table().contains_key(keys::THEME) {
        doc[keys::THEME] = table();
        added.push(keys::THEME.to_string());
    }

    Ok((doc.to_string(), added))
}

/// Backfill a config file in place; the file is only rewritten when
/// something was added
pub fn fill_file(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let (updated, added) = add_missing_sections(&contents)
        .with_context(|| format!("Failed to parse TOML from {}", path.display()))?;

    if !added.is_empty() {
        fs::write(path, updated)
            .with_context(|| format!("Failed to write config file to {}", path.display()))?;
        info!(path = %path.display(), added = ?added, "Added missing config sections");
    }
    Ok(added)
}
