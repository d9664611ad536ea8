//! Theme configuration for the site's utility-class build
//!
//! Loads `tailwind.config.toml` (or its JSON twin), validates it against a
//! fixed schema and reports problems by key path before the external
//! compiler ever sees the document.

#![forbid(unsafe_code)]

pub mod color;
pub mod config;
pub mod constants;
pub mod content;
pub mod query;
