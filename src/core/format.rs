//! Locale currency rendering.

use crate::domain::model::{AmountValue, CurrencyStyle, GroupingStyle, LocaleSymbols, SymbolPlacement};
use rust_decimal::RoundingStrategy;

const NBSP: char = '\u{00A0}';

/// Render `value` with the locale's currency rules.
///
/// The value is rounded half-even to the currency's fraction digits, the
/// integer part is grouped and the symbol placed per locale. Negative amounts
/// carry a leading `-` in front of the whole rendering.
pub fn render_currency(value: AmountValue, symbols: &LocaleSymbols) -> String {
    let style = &symbols.currency;
    let rounded =
        value.round_dp_with_strategy(style.fraction_digits, RoundingStrategy::MidpointNearestEven);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut magnitude = rounded.abs();
    magnitude.rescale(style.fraction_digits);
    let digits = magnitude.to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut number = group_integer_digits(integer, symbols.separators.grouping, style);
    if let Some(fraction) = fraction {
        number.push(symbols.separators.decimal);
        number.push_str(fraction);
    }

    let body = place_symbol(&number, style);
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

fn place_symbol(number: &str, style: &CurrencyStyle) -> String {
    let mut out = String::with_capacity(number.len() + style.symbol.len() + 2);
    match style.placement {
        SymbolPlacement::Prefix => {
            out.push_str(&style.symbol);
            if style.spaced {
                out.push(NBSP);
            }
            out.push_str(number);
        }
        SymbolPlacement::Suffix => {
            out.push_str(number);
            if style.spaced {
                out.push(NBSP);
            }
            out.push_str(&style.symbol);
        }
    }
    out
}

/// Insert `separator` between digit groups, counting from the right.
pub fn group_integer_digits(integer: &str, separator: char, style: &CurrencyStyle) -> String {
    let len = integer.len();
    if len < 3 + usize::from(style.min_grouping_digits) {
        return integer.to_string();
    }

    let mut groups = Vec::new();
    let mut end = len;
    let mut size = 3;
    while end > size {
        groups.push(&integer[end - size..end]);
        end -= size;
        if style.grouping == GroupingStyle::Indian {
            size = 2;
        }
    }
    groups.push(&integer[..end]);
    groups.reverse();

    let mut buf = [0; 4];
    let separator: &str = separator.encode_utf8(&mut buf);
    groups.join(separator)
}
