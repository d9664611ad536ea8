//! Dotted key-path lookups such as `theme.screens.md`
//!
//! Paths address the serialized document, so they use the same key names as
//! the config file. Segments containing dots can be quoted:
//! `theme.extend.colors."brand.primary"`. Numeric segments index arrays,
//! either as `content.0` or `content[0]`.

use serde_json::Value;

use crate::config::{ConfigError, ThemeConfig};

/// Resolve `path` against the config, returning a copy of the value found
pub fn lookup(config: &ThemeConfig, path: &str) -> Result<Value, ConfigError> {
    let document = serde_json::to_value(config).map_err(|e| ConfigError::Serialize(e.to_string()))?;
    let segments = split_path(path).ok_or_else(|| ConfigError::UnknownPath(path.to_string()))?;

    let mut current = &document;
    for segment in &segments {
        current = match current {
            Value::Object(map) => map.get(segment.as_str()),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(|| ConfigError::UnknownPath(path.to_string()))?;
    }

    Ok(current.clone())
}

/// Split on unquoted dots and `[n]` suffixes. Returns `None` for an empty
/// path, an empty segment or an unterminated quote.
fn split_path(path: &str) -> Option<Vec<String>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    // `a[0].b` has nothing pending at the dot and is still well formed
    let mut after_index = false;
    let mut chars = path.trim().chars();

    while let Some(c) = chars.next() {
        match c {
            '.' if !quoted => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                } else if !after_index {
                    return None;
                }
                after_index = false;
            }
            '[' if !quoted => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                let mut index = String::new();
                for d in chars.by_ref() {
                    if d == ']' {
                        break;
                    }
                    index.push(d);
                }
                if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                segments.push(index);
                after_index = true;
            }
            '"' => {
                quoted = !quoted;
                after_index = false;
            }
            _ => {
                current.push(c);
                after_index = false;
            }
        }
    }

    if quoted {
        return None;
    }
    if !current.is_empty() {
        segments.push(current);
    } else if !after_index && !segments.is_empty() {
        return None;
    }

    (!segments.is_empty()).then_some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_path_variants() {
        assert_eq!(split_path("theme.screens.md").unwrap(), ["theme", "screens", "md"]);
        assert_eq!(
            split_path(r#"theme.extend.colors."a.b""#).unwrap(),
            ["theme", "extend", "colors", "a.b"]
        );
        assert_eq!(split_path("content[2]").unwrap(), ["content", "2"]);
        assert_eq!(split_path("theme.fontFamily.sans[0]").unwrap(), ["theme", "fontFamily", "sans", "0"]);
        assert!(split_path("").is_none());
        assert!(split_path("theme..screens").is_none());
        assert!(split_path("theme.").is_none());
        assert!(split_path("content[x]").is_none());
        assert!(split_path("\"open").is_none());
    }

    #[test]
    fn test_lookup_builtin_values() {
        let config = ThemeConfig::builtin().unwrap();

        assert_eq!(lookup(&config, "theme.screens.md").unwrap(), json!("768px"));
        assert_eq!(lookup(&config, "theme.screens.xxxl").unwrap(), json!("2048px"));
        assert_eq!(lookup(&config, "theme.extend.colors.yellow-50").unwrap(), json!("#fdfdea"));
        assert_eq!(lookup(&config, "theme.extend.colors.flutter.yellow").unwrap(), json!("#FFF0B1"));
        assert_eq!(lookup(&config, "theme.fontFamily.sans[4]").unwrap(), json!("sans-serif"));
        assert_eq!(lookup(&config, "content.0").unwrap(), json!("./content/**/*.md"));
        assert_eq!(lookup(&config, "plugins").unwrap(), json!([]));
        assert_eq!(lookup(&config, "variants").unwrap(), json!({}));
    }

    #[test]
    fn test_lookup_unknown_path() {
        let config = ThemeConfig::builtin().unwrap();
        for path in ["theme.screens.xs", "theme.screens.md.value", "content[9]", "theme..x"] {
            assert!(
                matches!(lookup(&config, path), Err(ConfigError::UnknownPath(p)) if p == path),
                "{path} should be unknown"
            );
        }
    }
}
