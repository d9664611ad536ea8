//! Theme configuration schema
//!
//! Plain records mirroring the document layout. Leaf values are validated
//! while deserializing so that failures carry the key path of the offending
//! entry; structural checks that need the whole document live in the loader.

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::CssColor;

/// Declarative settings handed to the utility-class compiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Globs of source files scanned for class names (required, non-empty)
    #[serde(default)]
    pub content: Vec<ContentGlob>,

    #[serde(default)]
    pub theme: Theme,

    /// Per-utility variant overrides, kept as written
    #[serde(default)]
    pub variants: IndexMap<String, serde_json::Value>,

    /// Plugin package references, in load order
    #[serde(default)]
    pub plugins: Vec<String>,

    /// Keys this schema does not know; carried through re-serialization
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Design tokens. `fontFamily` and `screens` replace the compiler's defaults
/// wholesale when present; `extend` is merged on top of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<IndexMap<String, Vec<String>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screens: Option<IndexMap<String, ScreenLength>>,

    #[serde(default, skip_serializing_if = "ThemeExtend::is_empty")]
    pub extend: ThemeExtend,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeExtend {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub colors: IndexMap<String, ColorValue>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl ThemeExtend {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.extra.is_empty()
    }
}

/// A palette entry: a single color, or a named family of shades
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorValue {
    Color(CssColor),
    Palette(IndexMap<String, ColorValue>),
}

impl<'de> Deserialize<'de> for ColorValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ColorValueVisitor;

        impl<'de> Visitor<'de> for ColorValueVisitor {
            type Value = ColorValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a CSS color string or a table of shades")
            }

            fn visit_str<E>(self, v: &str) -> Result<ColorValue, E>
            where
                E: de::Error,
            {
                v.parse::<CssColor>().map(ColorValue::Color).map_err(E::custom)
            }

            fn visit_map<A>(self, mut map: A) -> Result<ColorValue, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut palette = IndexMap::new();
                while let Some((name, value)) = map.next_entry::<String, ColorValue>()? {
                    palette.insert(name, value);
                }
                Ok(ColorValue::Palette(palette))
            }
        }

        deserializer.deserialize_any(ColorValueVisitor)
    }
}

/// A `content` glob. Only syntax is checked here; matching happens against
/// the project root at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentGlob(String);

impl ContentGlob {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentGlob {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err("content pattern must not be empty".to_string());
        }
        glob::Pattern::new(&value)
            .map_err(|e| format!("invalid glob pattern `{value}`: {e}"))?;
        Ok(Self(value))
    }
}

impl From<ContentGlob> for String {
    fn from(glob: ContentGlob) -> Self {
        glob.0
    }
}

impl fmt::Display for ContentGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Units accepted for breakpoint lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Px,
    Rem,
    Em,
}

impl LengthUnit {
    /// `Rem` precedes `Em` so the longer suffix is tried first
    const ALL: [LengthUnit; 3] = [LengthUnit::Px, LengthUnit::Rem, LengthUnit::Em];

    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Rem => "rem",
            LengthUnit::Em => "em",
        }
    }
}

/// Breakpoint width such as `768px` or `48rem`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScreenLength {
    raw: String,
    value: f64,
    unit: LengthUnit,
}

impl ScreenLength {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Approximate width in pixels, taking 1em = 1rem = 16px
    pub fn to_px(&self) -> f64 {
        match self.unit {
            LengthUnit::Px => self.value,
            LengthUnit::Rem | LengthUnit::Em => self.value * 16.0,
        }
    }
}

impl FromStr for ScreenLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || format!("invalid screen length `{s}`, expected a number followed by px, rem or em");

        let (number, unit) = LengthUnit::ALL
            .into_iter()
            .find_map(|unit| trimmed.strip_suffix(unit.suffix()).map(|n| (n, unit)))
            .ok_or_else(invalid)?;

        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
            return Err(invalid());
        }
        let value: f64 = number.parse().map_err(|_| invalid())?;

        Ok(Self { raw: s.to_string(), value, unit })
    }
}

impl TryFrom<String> for ScreenLength {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScreenLength> for String {
    fn from(length: ScreenLength) -> Self {
        length.raw
    }
}

impl fmt::Display for ScreenLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl ThemeConfig {
    /// Font fallback chain for a role such as `sans`
    pub fn font_stack(&self, role: &str) -> Option<&[String]> {
        self.theme
            .font_family
            .as_ref()
            .and_then(|families| families.get(role))
            .map(Vec::as_slice)
    }

    pub fn screen(&self, name: &str) -> Option<&ScreenLength> {
        self.theme.screens.as_ref().and_then(|screens| screens.get(name))
    }

    /// Look up an extended color. Nested shades may be addressed with either
    /// separator: `flutter.yellow` and `flutter-yellow` are equivalent.
    pub fn color(&self, name: &str) -> Option<&CssColor> {
        find_color(&self.theme.extend.colors, name)
    }
}

fn find_color<'a>(palette: &'a IndexMap<String, ColorValue>, name: &str) -> Option<&'a CssColor> {
    if let Some(ColorValue::Color(color)) = palette.get(name) {
        return Some(color);
    }

    palette.iter().find_map(|(key, value)| {
        let ColorValue::Palette(shades) = value else {
            return None;
        };
        let rest = name.strip_prefix(key.as_str())?;
        let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix('-'))?;
        find_color(shades, rest)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_length_units() {
        let px: ScreenLength = "768px".parse().unwrap();
        assert_eq!(px.value(), 768.0);
        assert_eq!(px.unit(), LengthUnit::Px);

        let rem: ScreenLength = "48rem".parse().unwrap();
        assert_eq!(rem.unit(), LengthUnit::Rem);
        assert_eq!(rem.to_px(), 768.0);

        let em: ScreenLength = "40.5em".parse().unwrap();
        assert_eq!(em.unit(), LengthUnit::Em);
        assert_eq!(em.value(), 40.5);
    }

    #[test]
    fn test_screen_length_rejects_malformed_values() {
        for bad in ["768", "px", "-10px", "12vw", "1e3px", "abcpx", ""] {
            assert!(bad.parse::<ScreenLength>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_content_glob_validation() {
        assert!(ContentGlob::try_from("./content/**/*.md".to_string()).is_ok());
        assert!(ContentGlob::try_from("   ".to_string()).is_err());
        assert!(ContentGlob::try_from("./content/[*.md".to_string()).is_err());
    }

    #[test]
    fn test_color_value_accepts_nested_palettes() {
        let value: ColorValue =
            serde_json::from_str(r##"{ "yellow": "#FFF0B1", "deep": { "900": "#111" } }"##).unwrap();
        let ColorValue::Palette(shades) = value else {
            panic!("expected a palette");
        };
        assert_eq!(shades.len(), 2);
        assert!(matches!(shades.get("deep"), Some(ColorValue::Palette(_))));
    }

    #[test]
    fn test_color_value_rejects_numbers() {
        let err = serde_json::from_str::<ColorValue>("12").unwrap_err();
        assert!(err.to_string().contains("a CSS color string or a table of shades"));
    }

    #[test]
    fn test_color_lookup_by_dotted_and_dashed_names() {
        let mut flutter = IndexMap::new();
        flutter.insert("yellow".to_string(), ColorValue::Color("#FFF0B1".parse().unwrap()));
        let mut colors = IndexMap::new();
        colors.insert("yellow-50".to_string(), ColorValue::Color("#fdfdea".parse().unwrap()));
        colors.insert("flutter".to_string(), ColorValue::Palette(flutter));

        let config = ThemeConfig {
            content: vec![ContentGlob::try_from("*.html".to_string()).unwrap()],
            theme: Theme {
                extend: ThemeExtend { colors, extra: IndexMap::new() },
                ..Theme::default()
            },
            variants: IndexMap::new(),
            plugins: Vec::new(),
            extra: IndexMap::new(),
        };

        assert_eq!(config.color("yellow-50").map(CssColor::as_str), Some("#fdfdea"));
        assert_eq!(config.color("flutter.yellow").map(CssColor::as_str), Some("#FFF0B1"));
        assert_eq!(config.color("flutter-yellow").map(CssColor::as_str), Some("#FFF0B1"));
        assert!(config.color("flutter").is_none());
        assert!(config.color("flutter.blue").is_none());
    }

    #[test]
    fn test_theme_deserializes_from_toml() {
        let theme: Theme = toml::from_str(
            r##"
fontFamily = { sans = ["Inter", "sans-serif"] }
screens = { md = "768px", lg = "64rem" }
extend = { colors = { flutter = { yellow = "#FFF0B1" } } }
"##,
        )
        .unwrap();

        let screens = theme.screens.as_ref().unwrap();
        assert_eq!(screens["md"].unit(), LengthUnit::Px);
        assert_eq!(screens["lg"].to_px(), 1024.0);
        assert_eq!(theme.font_family.unwrap()["sans"], ["Inter", "sans-serif"]);
        assert!(matches!(theme.extend.colors.get("flutter"), Some(ColorValue::Palette(_))));
        assert!(theme.extra.is_empty());
    }

    #[test]
    fn test_unknown_theme_keys_are_kept() {
        let theme: Theme =
            toml::from_str("spacing = { \"72\" = \"18rem\" }\nextend = { spacing = { \"84\" = \"21rem\" } }\n")
                .unwrap();
        assert_eq!(theme.extra["spacing"]["72"], "18rem");
        assert_eq!(theme.extend.extra["spacing"]["84"], "21rem");
        assert!(!theme.extend.is_empty());
    }
}
