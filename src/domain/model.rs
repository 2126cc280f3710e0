use crate::utils::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exact monetary amount. Never stored as binary floating point.
pub type AmountValue = rust_decimal::Decimal;

/// Language plus optional region, e.g. `de-DE`.
///
/// Tags are case-insensitive and accept `-` or `_` between the parts, so
/// `de_de`, `DE-de` and `de-DE` are the same locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId {
    language: String,
    region: Option<String>,
}

impl LocaleId {
    pub fn new(language: &str, region: Option<&str>) -> Result<Self> {
        let language = language.to_ascii_lowercase();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CodecError::invalid_argument(format!(
                "invalid language subtag '{}'",
                language
            )));
        }

        let region = match region {
            Some(r) => {
                let r = r.to_ascii_uppercase();
                let alpha = r.len() == 2 && r.chars().all(|c| c.is_ascii_alphabetic());
                let numeric = r.len() == 3 && r.chars().all(|c| c.is_ascii_digit());
                if !alpha && !numeric {
                    return Err(CodecError::invalid_argument(format!(
                        "invalid region subtag '{}'",
                        r
                    )));
                }
                Some(r)
            }
            None => None,
        };

        Ok(Self { language, region })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The same locale with the region replaced.
    pub fn with_region(&self, region: &str) -> Result<Self> {
        Self::new(&self.language, Some(region))
    }
}

impl FromStr for LocaleId {
    type Err = CodecError;

    fn from_str(tag: &str) -> Result<Self> {
        let mut parts = tag.trim().split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        let region = parts.next();
        if parts.next().is_some() {
            return Err(CodecError::invalid_argument(format!(
                "unsupported locale tag '{}': only language and region are recognised",
                tag
            )));
        }
        Self::new(language, region)
    }
}

impl TryFrom<String> for LocaleId {
    type Error = CodecError;

    fn try_from(tag: String) -> Result<Self> {
        tag.parse()
    }
}

impl From<LocaleId> for String {
    fn from(locale: LocaleId) -> Self {
        locale.to_string()
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

/// Decimal and grouping separator of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorSet {
    pub decimal: char,
    pub grouping: char,
}

impl SeparatorSet {
    pub fn new(decimal: char, grouping: char) -> Self {
        Self { decimal, grouping }
    }

    /// Both separators are the same character, which makes grouping removal
    /// swallow the decimal point.
    pub fn collides(&self) -> bool {
        self.decimal == self.grouping
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPlacement {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingStyle {
    /// Groups of three digits.
    Standard,
    /// Three digits, then groups of two (`12,34,567`).
    Indian,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyStyle {
    pub symbol: String,
    pub placement: SymbolPlacement,
    /// A no-break space sits between symbol and number.
    pub spaced: bool,
    pub fraction_digits: u32,
    pub grouping: GroupingStyle,
    /// Integers need at least `3 + min_grouping_digits` digits to be grouped.
    pub min_grouping_digits: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSymbols {
    pub locale: LocaleId,
    pub separators: SeparatorSet,
    pub currency: CurrencyStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_tag_normalisation() {
        let a: LocaleId = "de_de".parse().unwrap();
        let b: LocaleId = "DE-de".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "de-DE");
        assert_eq!(a.language(), "de");
        assert_eq!(a.region(), Some("DE"));
    }

    #[test]
    fn test_language_only_tag() {
        let locale: LocaleId = "fr".parse().unwrap();
        assert_eq!(locale.region(), None);
        assert_eq!(locale.to_string(), "fr");
        assert_eq!(locale.with_region("ch").unwrap().to_string(), "fr-CH");
    }

    #[test]
    fn test_rejects_malformed_tags() {
        assert!("".parse::<LocaleId>().is_err());
        assert!("d".parse::<LocaleId>().is_err());
        assert!("de-Deutschland".parse::<LocaleId>().is_err());
        assert!("zh-Hant-TW".parse::<LocaleId>().is_err());
        assert!("es-419".parse::<LocaleId>().is_ok());
    }

    #[test]
    fn test_locale_serde_as_string() {
        let locale: LocaleId = "en-gb".parse().unwrap();
        let json = serde_json::to_string(&locale).unwrap();
        assert_eq!(json, "\"en-GB\"");
        let back: LocaleId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, locale);
    }

    #[test]
    fn test_separator_collision() {
        assert!(!SeparatorSet::new(',', '.').collides());
        assert!(SeparatorSet::new('.', '.').collides());
    }
}
