//! Load-time error and warning taxonomy
//!
//! Errors abort the load; warnings are reported and the load continues.

use std::path::PathBuf;
use thiserror::Error;

use super::loader::Format;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A key has the wrong shape; `path` is the dotted document path
    #[error("invalid value at `{path}`: {message}")]
    Schema { path: String, message: String },

    #[error("config is not valid {format}: {message}")]
    Syntax { format: Format, message: String },

    #[error("failed to read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported config file {}, expected a .toml or .json file", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("no value at key path `{0}`")]
    UnknownPath(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

impl ConfigError {
    pub(crate) fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Schema { path: path.into(), message: message.into() }
    }

    /// Key path of a schema error, if this is one
    pub fn path(&self) -> Option<&str> {
        match self {
            ConfigError::Schema { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Non-fatal findings collected while loading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    #[error("content pattern `{pattern}` matches no files")]
    UnmatchedContent { pattern: String },

    #[error("unknown key `{path}` ignored")]
    UnknownKey { path: String },

    #[error("screen `{name}` is not wider than the preceding screen `{previous}`")]
    UnorderedScreens { previous: String, name: String },

    #[error("color palette `{path}` has no entries")]
    EmptyPalette { path: String },
}
