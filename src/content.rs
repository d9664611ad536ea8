//! Resolving `content` globs against the project tree
//!
//! The compiler does the real scanning; this only answers which files each
//! pattern would hand it, so typos show up before a build produces an empty
//! stylesheet.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::ContentGlob;

/// Files matched by one content pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentMatch {
    pub pattern: String,
    pub files: Vec<PathBuf>,
}

/// Expand every pattern relative to `root`, keeping pattern order
pub fn resolve(root: &Path, patterns: &[ContentGlob]) -> Vec<ContentMatch> {
    patterns
        .iter()
        .map(|pattern| ContentMatch {
            pattern: pattern.to_string(),
            files: expand(root, pattern.as_str()),
        })
        .collect()
}

/// Patterns that match no file under `root`
pub fn unmatched(root: &Path, patterns: &[ContentGlob]) -> Vec<String> {
    resolve(root, patterns)
        .into_iter()
        .filter(|m| m.files.is_empty())
        .map(|m| m.pattern)
        .collect()
}

/// Sorted, de-duplicated regular files matched by a single pattern
fn expand(root: &Path, pattern: &str) -> Vec<PathBuf> {
    let relative = pattern.strip_prefix("./").unwrap_or(pattern);
    let full = if Path::new(relative).is_absolute() {
        relative.to_string()
    } else {
        // The root is literal text, not part of the pattern
        let escaped = glob::Pattern::escape(&root.to_string_lossy());
        format!("{}/{relative}", escaped.trim_end_matches('/'))
    };

    let paths = match glob::glob(&full) {
        Ok(paths) => paths,
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "Could not expand content pattern");
            return Vec::new();
        }
    };

    let files: BTreeSet<PathBuf> = paths
        .filter_map(|entry| {
            entry
                .inspect_err(|e| debug!(error = %e, "Skipping unreadable path"))
                .ok()
        })
        .filter(|path| path.is_file())
        .collect();

    debug!(pattern = %pattern, count = files.len(), "Expanded content pattern");
    files.into_iter().collect()
}
