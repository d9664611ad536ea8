//! CSS color literals used as palette leaves
//!
//! Colors keep the spelling they were authored with so that re-serialization
//! reproduces the document; the parsed form is only used for validation and
//! for reporting channel values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::validation::{COLOR_FUNCTIONS, COLOR_KEYWORDS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid CSS color literal `{0}`, expected #rgb, #rgba, #rrggbb, #rrggbbaa, a keyword or rgb()/hsl() notation")]
pub struct InvalidColor(pub String);

/// RGBA color parsed from hex notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl HexColor {
    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the `#` is required)
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        // Short forms double each nibble: #abc == #aabbcc
        let expand = |i: usize| -> Option<u8> {
            let nibble = u8::from_str_radix(&digits[i..i + 1], 16).ok()?;
            Some(nibble * 0x11)
        };
        let pair = |i: usize| -> Option<u8> { u8::from_str_radix(&digits[i..i + 2], 16).ok() };

        match digits.len() {
            3 => Some(Self { red: expand(0)?, green: expand(1)?, blue: expand(2)?, alpha: 0xFF }),
            4 => Some(Self { red: expand(0)?, green: expand(1)?, blue: expand(2)?, alpha: expand(3)? }),
            6 => Some(Self { red: pair(0)?, green: pair(2)?, blue: pair(4)?, alpha: 0xFF }),
            8 => Some(Self { red: pair(0)?, green: pair(2)?, blue: pair(4)?, alpha: pair(6)? }),
            _ => None,
        }
    }

    /// Canonical lowercase form, alpha omitted when opaque
    pub fn to_hex_string(&self) -> String {
        if self.alpha == 0xFF {
            format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.red, self.green, self.blue, self.alpha)
        }
    }
}

/// How a color literal was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKind {
    Hex(HexColor),
    Keyword,
    Function,
}

/// A validated CSS color literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CssColor {
    raw: String,
    kind: ColorKind,
}

impl CssColor {
    /// The literal exactly as authored
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> ColorKind {
        self.kind
    }

    /// Channel values, available for hex literals only
    pub fn hex(&self) -> Option<HexColor> {
        match self.kind {
            ColorKind::Hex(hex) => Some(hex),
            _ => None,
        }
    }
}

/// `name(args)` with a known function name and a non-empty argument list
fn is_color_function(s: &str) -> bool {
    let Some((name, rest)) = s.split_once('(') else {
        return false;
    };
    let Some(args) = rest.strip_suffix(')') else {
        return false;
    };
    COLOR_FUNCTIONS.contains(&name.trim())
        && !args.trim().is_empty()
        && !args.contains(['(', ')'])
}

impl FromStr for CssColor {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let kind = if let Some(hex) = HexColor::parse(trimmed) {
            ColorKind::Hex(hex)
        } else if COLOR_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(trimmed)) {
            ColorKind::Keyword
        } else if is_color_function(trimmed) {
            ColorKind::Function
        } else {
            return Err(InvalidColor(s.to_string()));
        };

        Ok(Self { raw: s.to_string(), kind })
    }
}

impl TryFrom<String> for CssColor {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CssColor> for String {
    fn from(color: CssColor) -> Self {
        color.raw
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        let hex = HexColor::parse("#FFF0B1").unwrap();
        assert_eq!((hex.red, hex.green, hex.blue, hex.alpha), (0xFF, 0xF0, 0xB1, 0xFF));
        assert_eq!(hex.to_hex_string(), "#fff0b1");
    }

    #[test]
    fn test_parse_short_hex_expands_nibbles() {
        let hex = HexColor::parse("#f0a8").unwrap();
        assert_eq!((hex.red, hex.green, hex.blue, hex.alpha), (0xFF, 0x00, 0xAA, 0x88));
    }

    #[test]
    fn test_hex_requires_prefix_and_valid_length() {
        assert!(HexColor::parse("fdfdea").is_none());
        assert!(HexColor::parse("#fdfde").is_none());
        assert!(HexColor::parse("#gggggg").is_none());
        assert!(HexColor::parse("#").is_none());
    }

    #[test]
    fn test_css_color_preserves_authored_spelling() {
        let color: CssColor = "#1A202C".parse().unwrap();
        assert_eq!(color.as_str(), "#1A202C");
        assert_eq!(String::from(color.clone()), "#1A202C");
        assert_eq!(color.hex().unwrap().to_hex_string(), "#1a202c");
    }

    #[test]
    fn test_css_color_keywords_and_functions() {
        assert_eq!("transparent".parse::<CssColor>().unwrap().kind(), ColorKind::Keyword);
        assert_eq!("currentcolor".parse::<CssColor>().unwrap().kind(), ColorKind::Keyword);
        assert_eq!("rgb(255 0 0 / 50%)".parse::<CssColor>().unwrap().kind(), ColorKind::Function);
        assert_eq!("hsla(120, 50%, 50%, 0.3)".parse::<CssColor>().unwrap().kind(), ColorKind::Function);
        assert!("hsl()".parse::<CssColor>().is_err());
        assert!("calc(1px)".parse::<CssColor>().is_err());
        assert!("yellowish".parse::<CssColor>().is_err());
    }

    #[test]
    fn test_invalid_color_message_names_literal() {
        let err = "#12".parse::<CssColor>().unwrap_err();
        assert!(err.to_string().contains("`#12`"));
    }
}
