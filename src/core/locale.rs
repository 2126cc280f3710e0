//! Locale formatting symbols.
//!
//! `BuiltinSymbols` is the crate's locale database: CLDR-style separators and
//! currency display rules for a fixed set of regions. `SymbolTable` layers
//! per-locale overrides on top of it, which is how a deployment corrects a
//! locale whose reported separators are wrong.

use crate::domain::model::{
    CurrencyStyle, GroupingStyle, LocaleId, LocaleSymbols, SeparatorSet, SymbolPlacement,
};
use crate::domain::ports::SymbolProvider;
use crate::utils::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const NBSP: char = '\u{00A0}';
const NARROW_NBSP: char = '\u{202F}';

struct BuiltinEntry {
    tag: &'static str,
    decimal: char,
    grouping: char,
    symbol: &'static str,
    placement: SymbolPlacement,
    spaced: bool,
    fraction_digits: u32,
    style: GroupingStyle,
    min_grouping_digits: u8,
}

const fn entry(
    tag: &'static str,
    decimal: char,
    grouping: char,
    symbol: &'static str,
    placement: SymbolPlacement,
    spaced: bool,
) -> BuiltinEntry {
    BuiltinEntry {
        tag,
        decimal,
        grouping,
        symbol,
        placement,
        spaced,
        fraction_digits: 2,
        style: GroupingStyle::Standard,
        min_grouping_digits: 1,
    }
}

use SymbolPlacement::{Prefix, Suffix};

static BUILTIN: &[BuiltinEntry] = &[
    entry("en-US", '.', ',', "$", Prefix, false),
    entry("en-GB", '.', ',', "£", Prefix, false),
    BuiltinEntry {
        style: GroupingStyle::Indian,
        ..entry("en-IN", '.', ',', "₹", Prefix, false)
    },
    entry("de-DE", ',', '.', "€", Suffix, true),
    entry("de-AT", ',', NBSP, "€", Prefix, true),
    entry("de-CH", '.', '’', "CHF", Prefix, true),
    entry("fr-FR", ',', NARROW_NBSP, "€", Suffix, true),
    entry("it-IT", ',', '.', "€", Suffix, true),
    BuiltinEntry {
        min_grouping_digits: 2,
        ..entry("es-ES", ',', '.', "€", Suffix, true)
    },
    entry("nl-NL", ',', '.', "€", Prefix, true),
    entry("pt-BR", ',', '.', "R$", Prefix, true),
    entry("sv-SE", ',', NBSP, "kr", Suffix, true),
    BuiltinEntry {
        fraction_digits: 0,
        ..entry("ja-JP", '.', ',', "￥", Prefix, false)
    },
    entry("zh-CN", '.', ',', "¥", Prefix, false),
];

/// Region assumed for a language-only tag.
fn default_region(language: &str) -> Option<&'static str> {
    match language {
        "en" => Some("US"),
        "de" => Some("DE"),
        "fr" => Some("FR"),
        "it" => Some("IT"),
        "es" => Some("ES"),
        "nl" => Some("NL"),
        "pt" => Some("BR"),
        "sv" => Some("SE"),
        "ja" => Some("JP"),
        "zh" => Some("CN"),
        _ => None,
    }
}

impl BuiltinEntry {
    fn to_symbols(&self, locale: LocaleId) -> LocaleSymbols {
        LocaleSymbols {
            locale,
            separators: SeparatorSet::new(self.decimal, self.grouping),
            currency: CurrencyStyle {
                symbol: self.symbol.to_string(),
                placement: self.placement,
                spaced: self.spaced,
                fraction_digits: self.fraction_digits,
                grouping: self.style,
                min_grouping_digits: self.min_grouping_digits,
            },
        }
    }
}

/// Built-in locale database.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSymbols;

impl BuiltinSymbols {
    /// Tags of every built-in locale, in table order.
    pub fn supported_tags() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|e| e.tag)
    }

    pub fn supported_locales() -> Vec<LocaleId> {
        Self::supported_tags()
            .filter_map(|tag| tag.parse().ok())
            .collect()
    }

    /// Fill in the default region of a language-only tag.
    pub fn canonicalize(locale: &LocaleId) -> Result<LocaleId> {
        match locale.region() {
            Some(_) => Ok(locale.clone()),
            None => match default_region(locale.language()) {
                Some(region) => locale.with_region(region),
                None => Err(unsupported(locale)),
            },
        }
    }

    pub fn lookup(locale: &LocaleId) -> Result<LocaleSymbols> {
        let canonical = Self::canonicalize(locale)?;
        let tag = canonical.to_string();
        BUILTIN
            .iter()
            .find(|e| e.tag == tag)
            .map(|e| e.to_symbols(canonical))
            .ok_or_else(|| unsupported(locale))
    }
}

impl SymbolProvider for BuiltinSymbols {
    fn symbols(&self, locale: &LocaleId) -> Result<LocaleSymbols> {
        Self::lookup(locale)
    }
}

fn unsupported(locale: &LocaleId) -> CodecError {
    CodecError::invalid_argument(format!("unsupported locale '{}'", locale))
}

/// Replacement values for a built-in locale. Unset fields keep the
/// built-in value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolOverride {
    pub decimal: Option<char>,
    pub grouping: Option<char>,
    pub currency_symbol: Option<String>,
    pub placement: Option<SymbolPlacement>,
    pub fraction_digits: Option<u32>,
}

impl SymbolOverride {
    fn apply(&self, symbols: &mut LocaleSymbols) {
        if let Some(decimal) = self.decimal {
            symbols.separators.decimal = decimal;
        }
        if let Some(grouping) = self.grouping {
            symbols.separators.grouping = grouping;
        }
        if let Some(symbol) = &self.currency_symbol {
            symbols.currency.symbol = symbol.clone();
        }
        if let Some(placement) = self.placement {
            symbols.currency.placement = placement;
        }
        if let Some(digits) = self.fraction_digits {
            symbols.currency.fraction_digits = digits;
        }
    }
}

/// Built-in symbols with overrides keyed by canonical locale.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    overrides: HashMap<LocaleId, SymbolOverride>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override. The locale must be a built-in one.
    pub fn with_override(mut self, locale: &LocaleId, patch: SymbolOverride) -> Result<Self> {
        let canonical = BuiltinSymbols::lookup(locale)?.locale;
        tracing::debug!("Registering symbol override for {}: {:?}", canonical, patch);
        self.overrides.insert(canonical, patch);
        Ok(self)
    }

    pub fn overridden_locales(&self) -> impl Iterator<Item = &LocaleId> {
        self.overrides.keys()
    }
}

impl SymbolProvider for SymbolTable {
    fn symbols(&self, locale: &LocaleId) -> Result<LocaleSymbols> {
        let mut symbols = BuiltinSymbols::lookup(locale)?;
        if let Some(patch) = self.overrides.get(&symbols.locale) {
            patch.apply(&mut symbols);
        }
        Ok(symbols)
    }
}
