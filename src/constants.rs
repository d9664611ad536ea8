//! Application-wide constants
//!
//! File names, environment variables, schema key names and validation
//! limits used throughout the crate.

/// Configuration file discovery
pub mod config {
    /// Directory under the user's config dir used as the last-resort location
    pub const APP_DIR: &str = "tw-theme";

    /// Primary (TOML) configuration file name
    pub const FILENAME: &str = "tailwind.config.toml";

    /// JSON variant of the configuration file, same schema
    pub const JSON_FILENAME: &str = "tailwind.config.json";

    /// Environment variable overriding the configuration path
    pub const PATH_ENV: &str = "TW_THEME_CONFIG";

    /// Environment variable selecting the log level
    pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

    /// The configuration document shipped with the site
    pub const BUILTIN_DOCUMENT: &str = include_str!("../tailwind.config.toml");
}

/// Document key names, as spelled in the configuration file
pub mod keys {
    pub const CONTENT: &str = "content";
    pub const THEME: &str = "theme";
    pub const VARIANTS: &str = "variants";
    pub const PLUGINS: &str = "plugins";

    pub const FONT_FAMILY: &str = "fontFamily";
    pub const SCREENS: &str = "screens";
    pub const EXTEND: &str = "extend";
    pub const COLORS: &str = "colors";

    /// Keys recognized at the top level of the document
    pub const TOP_LEVEL: &[&str] = &[CONTENT, THEME, VARIANTS, PLUGINS];

    /// Keys recognized directly under `theme`
    pub const THEME_LEVEL: &[&str] = &[FONT_FAMILY, SCREENS, EXTEND];

    /// Keys recognized directly under `theme.extend`
    pub const EXTEND_LEVEL: &[&str] = &[COLORS];
}

/// Value validation limits
pub mod validation {
    /// Color keywords accepted as palette leaves
    pub const COLOR_KEYWORDS: &[&str] = &["transparent", "currentColor", "current", "inherit"];

    /// Functional color notations accepted as palette leaves
    pub const COLOR_FUNCTIONS: &[&str] = &["rgb", "rgba", "hsl", "hsla"];

    /// Maximum nesting depth of a color sub-palette
    pub const MAX_PALETTE_DEPTH: usize = 8;
}
