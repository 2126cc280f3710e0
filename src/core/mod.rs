pub mod codec;
pub mod format;
pub mod locale;

pub use crate::domain::model::{AmountValue, LocaleId, LocaleSymbols, SeparatorSet};
pub use crate::domain::ports::{AmountConverter, SymbolProvider};
pub use crate::utils::error::Result;
