pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use crate::config::toml_config::TomlConfig;
pub use crate::core::codec::{
    format, parse, AmountTextCodec, CodecOptions, CollisionPolicy, EmptyInputPolicy, SENTINEL_AMOUNT,
};
pub use crate::core::locale::{BuiltinSymbols, SymbolOverride, SymbolTable};
pub use crate::domain::model::{AmountValue, LocaleId, LocaleSymbols, SeparatorSet};
pub use crate::domain::ports::{AmountConverter, SymbolProvider};
pub use crate::utils::error::{CodecError, Result};
