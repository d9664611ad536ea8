//! Loading and validating the theme configuration
//!
//! A document is parsed into a generic value first so unknown keys can be
//! reported without failing, then deserialized into [`ThemeConfig`] with key
//! path tracking. Checks spanning several entries run last.

use indexmap::IndexMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::error::{ConfigError, ConfigWarning};
use super::schema::{ColorValue, ThemeConfig};
use crate::constants::config::{APP_DIR, BUILTIN_DOCUMENT, FILENAME, JSON_FILENAME, PATH_ENV};
use crate::constants::keys;
use crate::constants::validation::MAX_PALETTE_DEPTH;
use crate::content;

/// A successfully loaded configuration and everything worth telling the user
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub config: ThemeConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Document syntax the configuration was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Toml => f.write_str("TOML"),
            Format::Json => f.write_str("JSON"),
        }
    }
}

impl Format {
    /// Pick the document syntax from the file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Parse and validate a document. Performs no filesystem access, so content
/// globs are only checked for syntax.
pub fn parse_str(contents: &str, format: Format) -> Result<LoadReport, ConfigError> {
    let value: serde_json::Value = match format {
        Format::Toml => toml::from_str(contents)
            .map_err(|e| ConfigError::Syntax { format, message: e.to_string() })?,
        Format::Json => serde_json::from_str(contents)
            .map_err(|e| ConfigError::Syntax { format, message: e.to_string() })?,
    };

    let Some(root) = value.as_object() else {
        return Err(ConfigError::Syntax {
            format,
            message: "top level must be a table of settings".to_string(),
        });
    };

    let mut warnings = Vec::new();
    collect_unknown_keys(root, &mut warnings);

    let config: ThemeConfig = serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        ConfigError::schema(path, err.into_inner().to_string())
    })?;

    validate(&config, &mut warnings)?;

    debug!(
        content = config.content.len(),
        colors = config.theme.extend.colors.len(),
        warnings = warnings.len(),
        "parsed theme config"
    );
    Ok(LoadReport { config, warnings })
}

/// Read, parse and validate a config file, resolving `content` globs
/// relative to the directory that holds it
pub fn load(path: &Path) -> Result<LoadReport, ConfigError> {
    let format = Format::from_path(path)?;
    let contents = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

    let mut report = parse_str(&contents, format)?;

    let root = project_root(path);
    for pattern in content::unmatched(&root, &report.config.content) {
        report.warnings.push(ConfigWarning::UnmatchedContent { pattern });
    }

    info!(path = %path.display(), format = %format, warnings = report.warnings.len(), "Loaded theme config");
    Ok(report)
}

/// Directory that `content` globs are resolved against
pub fn project_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Locate the config file: explicit path, then `TW_THEME_CONFIG`, then the
/// working directory (TOML before JSON), then the user config dir. Falls back
/// to `./tailwind.config.toml` when nothing exists yet.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = env::var(PATH_ENV) {
        if !path.trim().is_empty() {
            debug!(var = PATH_ENV, path = %path, "Using config path from environment");
            return PathBuf::from(path);
        }
    }

    let local = PathBuf::from(FILENAME);
    if local.exists() {
        return local;
    }
    let local_json = PathBuf::from(JSON_FILENAME);
    if local_json.exists() {
        return local_json;
    }

    if let Some(mut user) = dirs::config_dir() {
        user.push(APP_DIR);
        user.push(FILENAME);
        if user.exists() {
            return user;
        }
    }

    local
}

impl ThemeConfig {
    /// Load a config file, logging every warning. Schema errors are returned.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let report = load(path)?;
        for warning in &report.warnings {
            warn!(path = %path.display(), "{warning}");
        }
        Ok(report.config)
    }

    /// The configuration document shipped with the site
    pub fn builtin() -> Result<Self, ConfigError> {
        parse_str(BUILTIN_DOCUMENT, Format::Toml).map(|report| report.config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

fn collect_unknown_keys(
    root: &serde_json::Map<String, serde_json::Value>,
    warnings: &mut Vec<ConfigWarning>,
) {
    let mut report = |path: String| {
        warnings.push(ConfigWarning::UnknownKey { path });
    };

    for key in root.keys().filter(|k| !keys::TOP_LEVEL.contains(&k.as_str())) {
        report(key.clone());
    }

    let Some(theme) = root.get(keys::THEME).and_then(|v| v.as_object()) else {
        return;
    };
    for key in theme.keys().filter(|k| !keys::THEME_LEVEL.contains(&k.as_str())) {
        report(format!("{}.{key}", keys::THEME));
    }

    let Some(extend) = theme.get(keys::EXTEND).and_then(|v| v.as_object()) else {
        return;
    };
    for key in extend.keys().filter(|k| !keys::EXTEND_LEVEL.contains(&k.as_str())) {
        report(format!("{}.{}.{key}", keys::THEME, keys::EXTEND));
    }
}

/// Checks that need more than one value at a time
fn validate(config: &ThemeConfig, warnings: &mut Vec<ConfigWarning>) -> Result<(), ConfigError> {
    if config.content.is_empty() {
        return Err(ConfigError::schema(
            keys::CONTENT,
            "at least one glob pattern is required",
        ));
    }

    if let Some(families) = &config.theme.font_family {
        for (role, stack) in families {
            let path = format!("{}.{}.{role}", keys::THEME, keys::FONT_FAMILY);
            if stack.is_empty() {
                return Err(ConfigError::schema(path, "font stack must list at least one family"));
            }
            if let Some(index) = stack.iter().position(|family| family.trim().is_empty()) {
                return Err(ConfigError::schema(format!("{path}[{index}]"), "font family name must not be blank"));
            }
        }
    }

    if let Some(screens) = &config.theme.screens {
        let mut previous: Option<(&String, f64)> = None;
        for (name, length) in screens {
            let width = length.to_px();
            if let Some((previous_name, previous_width)) = previous {
                if width <= previous_width {
                    warnings.push(ConfigWarning::UnorderedScreens {
                        previous: previous_name.clone(),
                        name: name.clone(),
                    });
                }
            }
            previous = Some((name, width));
        }
    }

    let colors_path = format!("{}.{}.{}", keys::THEME, keys::EXTEND, keys::COLORS);
    validate_palette(&config.theme.extend.colors, &colors_path, 1, warnings)?;

    if let Some(index) = config.plugins.iter().position(|plugin| plugin.trim().is_empty()) {
        return Err(ConfigError::schema(
            format!("{}[{index}]", keys::PLUGINS),
            "plugin reference must not be blank",
        ));
    }

    Ok(())
}

fn validate_palette(
    palette: &IndexMap<String, ColorValue>,
    path: &str,
    depth: usize,
    warnings: &mut Vec<ConfigWarning>,
) -> Result<(), ConfigError> {
    for (name, value) in palette {
        let ColorValue::Palette(shades) = value else {
            continue;
        };
        let nested = format!("{path}.{name}");
        if depth >= MAX_PALETTE_DEPTH {
            return Err(ConfigError::schema(
                nested,
                format!("palettes may nest at most {MAX_PALETTE_DEPTH} levels"),
            ));
        }
        if shades.is_empty() {
            warnings.push(ConfigWarning::EmptyPalette { path: nested });
            continue;
        }
        validate_palette(shades, &nested, depth + 1, warnings)?;
    }
    Ok(())
}
