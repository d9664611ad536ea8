//! Theme configuration for the utility-class compiler
//!
//! - **schema**: the `ThemeConfig` record and its validated leaf types
//! - **loader**: parsing TOML/JSON documents, validation and warnings
//! - **document**: comment-preserving edits to the TOML file
//! - **error**: fatal errors and non-fatal warnings raised while loading

pub mod document;
pub mod error;
pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use error::{ConfigError, ConfigWarning};
pub use loader::{Format, LoadReport};
pub use schema::{ColorValue, ContentGlob, LengthUnit, ScreenLength, Theme, ThemeConfig, ThemeExtend};
