use crate::domain::model::{AmountValue, LocaleId, LocaleSymbols};
use crate::utils::error::Result;

/// Source of locale formatting symbols.
pub trait SymbolProvider: Send + Sync {
    fn symbols(&self, locale: &LocaleId) -> Result<LocaleSymbols>;
}

/// Binding seam for UI layers: converts between what an input field holds
/// (possibly nothing) and the amount a model holds (possibly nothing).
pub trait AmountConverter: Send + Sync {
    fn to_value(&self, locale: &LocaleId, text: Option<&str>) -> Result<AmountValue>;
    fn to_text(&self, locale: &LocaleId, value: Option<&AmountValue>) -> Result<String>;
}
