use crate::core::format::render_currency;
use crate::core::locale::BuiltinSymbols;
use crate::domain::model::{AmountValue, LocaleId, LocaleSymbols};
use crate::domain::ports::{AmountConverter, SymbolProvider};
use crate::utils::error::{CodecError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

/// Amount rendered in `InvalidFormat` payloads to show the expected input.
pub const SENTINEL_AMOUNT: AmountValue = AmountValue::from_parts(12345678, 0, 0, false, 2);

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[&:;=?@#|]|[a-zA-Z]").expect("disallowed-character pattern"));

// `\d` would also match non-ASCII digits.
static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]+").expect("non-numeric pattern"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyInputPolicy {
    /// Empty or absent text parses as zero.
    #[default]
    ZeroValue,
    /// Empty or absent text is an `InvalidFormat` error.
    Reject,
}

/// What to do when a locale's decimal and grouping separators are the same
/// character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Remove grouping, then map the decimal separator, as usual. The
    /// decimal point is lost.
    #[default]
    Preserve,
    /// Fail with `InvalidArgument`.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub on_empty: EmptyInputPolicy,
    pub separator_collision: CollisionPolicy,
}

/// Converts between localized amount text and exact decimal values.
///
/// The codec holds no per-call state; the locale is passed to every call and
/// its symbols are looked up fresh each time.
#[derive(Debug, Clone, Default)]
pub struct AmountTextCodec<P: SymbolProvider = BuiltinSymbols> {
    provider: P,
    options: CodecOptions,
}

impl AmountTextCodec<BuiltinSymbols> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: SymbolProvider> AmountTextCodec<P> {
    pub fn with_provider(provider: P, options: CodecOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> CodecOptions {
        self.options
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn symbols(&self, locale: &LocaleId) -> Result<LocaleSymbols> {
        self.provider.symbols(locale)
    }

    /// Parse user-entered amount text.
    pub fn parse(&self, locale: &LocaleId, text: &str) -> Result<AmountValue> {
        tracing::trace!("Parsing '{}' for locale {}", text, locale);

        if text.is_empty() {
            return match self.options.on_empty {
                EmptyInputPolicy::ZeroValue => {
                    tracing::trace!("Input was empty, returning zero");
                    Ok(AmountValue::ZERO)
                }
                EmptyInputPolicy::Reject => Err(self.invalid_format(locale, text)),
            };
        }

        if DISALLOWED.is_match(text) {
            tracing::debug!("Rejected '{}': contains letters or reserved symbols", text);
            return Err(self.invalid_format(locale, text));
        }

        let symbols = self.provider.symbols(locale)?;
        let separators = symbols.separators;
        tracing::trace!(
            "Decimal separator '{}', grouping separator '{}'",
            separators.decimal,
            separators.grouping
        );

        if separators.collides() {
            match self.options.separator_collision {
                CollisionPolicy::Preserve => tracing::warn!(
                    "Locale {} uses '{}' for both decimal and grouping; decimal point will be dropped",
                    symbols.locale,
                    separators.decimal
                ),
                CollisionPolicy::Reject => {
                    return Err(CodecError::invalid_argument(format!(
                        "locale {} uses '{}' as both decimal and grouping separator",
                        symbols.locale, separators.decimal
                    )))
                }
            }
        }

        let ungrouped = text.replace(separators.grouping, "");
        tracing::trace!("Without grouping: '{}'", ungrouped);

        let canonical = ungrouped.replace(separators.decimal, ".");
        tracing::trace!("Canonical decimal point: '{}'", canonical);

        let sanitized = NON_NUMERIC.replace_all(&canonical, "");
        tracing::trace!("Sanitized: '{}'", sanitized);

        match AmountValue::from_str(&sanitized) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::debug!("'{}' is not a decimal: {}", sanitized, e);
                Err(self.invalid_format_with(&symbols, text))
            }
        }
    }

    /// Render `value` as a locale currency string.
    pub fn format(&self, locale: &LocaleId, value: AmountValue) -> Result<String> {
        let symbols = self.provider.symbols(locale)?;
        let rendered = render_currency(value, &symbols);
        tracing::trace!("Formatted {} for {} as '{}'", value, symbols.locale, rendered);
        Ok(rendered)
    }

    /// The sentinel amount in the locale's currency format.
    pub fn hint(&self, locale: &LocaleId) -> Result<String> {
        self.format(locale, SENTINEL_AMOUNT)
    }

    fn invalid_format(&self, locale: &LocaleId, text: &str) -> CodecError {
        match self.provider.symbols(locale) {
            Ok(symbols) => self.invalid_format_with(&symbols, text),
            Err(e) => e,
        }
    }

    fn invalid_format_with(&self, symbols: &LocaleSymbols, text: &str) -> CodecError {
        CodecError::InvalidFormat {
            input: text.to_string(),
            example: render_currency(SENTINEL_AMOUNT, symbols),
        }
    }
}

impl<P: SymbolProvider> AmountConverter for AmountTextCodec<P> {
    fn to_value(&self, locale: &LocaleId, text: Option<&str>) -> Result<AmountValue> {
        self.parse(locale, text.unwrap_or_default())
    }

    fn to_text(&self, locale: &LocaleId, value: Option<&AmountValue>) -> Result<String> {
        let value = value.ok_or_else(|| CodecError::invalid_argument("no amount to format"))?;
        self.format(locale, *value)
    }
}

/// Parse `text` for the locale tag with the built-in symbols.
pub fn parse(locale: &str, text: &str) -> Result<AmountValue> {
    AmountTextCodec::new().parse(&locale.parse()?, text)
}

/// Format `value` for the locale tag with the built-in symbols.
pub fn format(locale: &str, value: AmountValue) -> Result<String> {
    AmountTextCodec::new().format(&locale.parse()?, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locale::{SymbolOverride, SymbolTable};
    use rust_decimal_macros::dec;

    fn locale(tag: &str) -> LocaleId {
        tag.parse().unwrap()
    }

    #[test]
    fn test_sentinel_constant() {
        assert_eq!(SENTINEL_AMOUNT, dec!(123456.78));
    }

    #[test]
    fn test_grouping_removed() {
        let codec = AmountTextCodec::new();
        assert_eq!(codec.parse(&locale("en-US"), "1,234.56").unwrap(), dec!(1234.56));
    }

    #[test]
    fn test_decimal_separator_remapped() {
        let codec = AmountTextCodec::new();
        assert_eq!(codec.parse(&locale("de-DE"), "1.234,56").unwrap(), dec!(1234.56));
        assert_eq!(codec.parse(&locale("de-DE"), "0,5").unwrap(), dec!(0.5));
    }

    #[test]
    fn test_currency_symbol_and_spaces_stripped() {
        let codec = AmountTextCodec::new();
        assert_eq!(codec.parse(&locale("en-US"), "$100.00").unwrap(), dec!(100.00));
        assert_eq!(codec.parse(&locale("fr-FR"), "1 234,50 €").unwrap(), dec!(1234.50));
        assert_eq!(codec.parse(&locale("de-DE"), " 12,30€ ").unwrap(), dec!(12.30));
    }

    #[test]
    fn test_scale_is_kept() {
        let value = parse("en-US", "100.00").unwrap();
        assert_eq!(value.scale(), 2);
        assert_eq!(value.to_string(), "100.00");
    }

    #[test]
    fn test_disallowed_characters_carry_hint() {
        let codec = AmountTextCodec::new();
        let err = codec.parse(&locale("de-DE"), "12#50").unwrap_err();
        match err {
            CodecError::InvalidFormat { input, example } => {
                assert_eq!(input, "12#50");
                assert_eq!(example, "123.456,78\u{a0}€");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_after_sanitation() {
        let codec = AmountTextCodec::new();
        let us = locale("en-US");
        assert!(matches!(codec.parse(&us, "   "), Err(CodecError::InvalidFormat { .. })));
        assert!(matches!(codec.parse(&us, "$"), Err(CodecError::InvalidFormat { .. })));
        assert!(matches!(codec.parse(&us, "1.2.3"), Err(CodecError::InvalidFormat { .. })));
    }

    #[test]
    fn test_minus_sign_is_stripped() {
        assert_eq!(parse("en-US", "-5.00").unwrap(), dec!(5.00));
    }

    #[test]
    fn test_empty_policy() {
        let zero = AmountTextCodec::new();
        assert_eq!(zero.parse(&locale("en-US"), "").unwrap(), AmountValue::ZERO);

        let strict = AmountTextCodec::with_provider(
            BuiltinSymbols,
            CodecOptions {
                on_empty: EmptyInputPolicy::Reject,
                ..Default::default()
            },
        );
        let err = strict.parse(&locale("en-US"), "").unwrap_err();
        assert_eq!(err.example(), Some("$123,456.78"));
    }

    fn colliding_table() -> SymbolTable {
        SymbolTable::new()
            .with_override(
                &locale("de-DE"),
                SymbolOverride {
                    decimal: Some('.'),
                    grouping: Some('.'),
                    ..Default::default()
                },
            )
            .unwrap()
    }

    #[test]
    fn test_collision_preserved_drops_decimal_point() {
        let codec = AmountTextCodec::with_provider(colliding_table(), CodecOptions::default());
        assert_eq!(codec.parse(&locale("de-DE"), "1.234.56").unwrap(), dec!(123456));
    }

    #[test]
    fn test_collision_rejected_when_configured() {
        let codec = AmountTextCodec::with_provider(
            colliding_table(),
            CodecOptions {
                separator_collision: CollisionPolicy::Reject,
                ..Default::default()
            },
        );
        let err = codec.parse(&locale("de-DE"), "1.234.56").unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument { .. }));
        // Empty input never reaches the separator lookup.
        assert_eq!(codec.parse(&locale("de-DE"), "").unwrap(), AmountValue::ZERO);
    }

    #[test]
    fn test_unsupported_locale() {
        let codec = AmountTextCodec::new();
        assert!(matches!(
            codec.parse(&locale("ko-KR"), "100"),
            Err(CodecError::InvalidArgument { .. })
        ));
        assert!(matches!(
            codec.format(&locale("ko-KR"), dec!(1)),
            Err(CodecError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_converter_binding() {
        let codec = AmountTextCodec::new();
        let de = locale("de");
        assert_eq!(codec.to_value(&de, None).unwrap(), AmountValue::ZERO);
        assert_eq!(codec.to_value(&de, Some("2,50")).unwrap(), dec!(2.50));
        assert_eq!(codec.to_text(&de, Some(&dec!(2.5))).unwrap(), "2,50\u{a0}€");
        assert!(matches!(
            codec.to_text(&de, None),
            Err(CodecError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_hint_matches_error_example() {
        let codec = AmountTextCodec::new();
        let ch = locale("de-CH");
        let err = codec.parse(&ch, "x").unwrap_err();
        assert_eq!(err.example().map(str::to_string), Some(codec.hint(&ch).unwrap()));
    }
}
