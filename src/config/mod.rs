pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "amount-codec")]
#[command(about = "Parse and format localized currency amounts")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Locale tag such as de-DE; overrides codec.default_locale
    #[arg(short, long, global = true)]
    pub locale: Option<String>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse localized amount text into a decimal
    Parse {
        /// Text as a user would type it; omit for empty input
        text: Option<String>,
    },
    /// Format a decimal (e.g. 1234.56) as a localized currency string
    Format { value: String },
    /// Show an example of correctly formatted input
    Hint,
    /// Show the separators and currency style of the locale
    Symbols,
    /// List built-in locales
    Locales,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Locale used when neither the command line nor the config file name one.
pub const FALLBACK_LOCALE: &str = "en-US";
