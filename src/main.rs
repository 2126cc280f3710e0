use amount_codec::config::{LogFormat, FALLBACK_LOCALE};
use amount_codec::utils::{logger, validation::Validate};
use amount_codec::{
    AmountTextCodec, AmountValue, BuiltinSymbols, CliConfig, CodecError, Command, LocaleId,
    Result, SymbolTable, TomlConfig,
};
use clap::Parser;
use serde_json::json;
use std::str::FromStr;

fn main() {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config) {
        tracing::error!(
            "amount-codec failed: {} (Category: {:?})",
            e,
            e.category()
        );
        tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());

        if config.json {
            let body = json!({
                "error": e.to_string(),
                "message": e.user_friendly_message(),
                "example": e.example(),
            });
            println!("{}", body);
        } else {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
        }
        std::process::exit(e.exit_code());
    }
}

fn load_file_config(config: &CliConfig) -> Result<TomlConfig> {
    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };
    file_config.validate()?;
    Ok(file_config)
}

fn resolve_locale(config: &CliConfig, file_config: &TomlConfig) -> Result<LocaleId> {
    if let Some(tag) = &config.locale {
        return tag.parse();
    }
    match file_config.default_locale()? {
        Some(locale) => Ok(locale),
        None => FALLBACK_LOCALE.parse(),
    }
}

fn run(config: &CliConfig) -> Result<()> {
    let file_config = load_file_config(config)?;
    let codec = file_config.build_codec()?;
    let locale = resolve_locale(config, &file_config)?;
    tracing::debug!("Using locale {}", locale);

    match &config.command {
        Command::Parse { text } => {
            let input = text.as_deref().unwrap_or_default();
            let value = codec.parse(&locale, input)?;
            if config.json {
                print_json(&json!({ "locale": locale, "input": input, "value": value }))?;
            } else {
                println!("{}", value);
            }
        }
        Command::Format { value } => {
            let amount = AmountValue::from_str(value.trim()).map_err(|e| {
                CodecError::invalid_argument(format!("'{}' is not a decimal: {}", value, e))
            })?;
            let rendered = codec.format(&locale, amount)?;
            if config.json {
                print_json(&json!({ "locale": locale, "value": amount, "text": rendered }))?;
            } else {
                println!("{}", rendered);
            }
        }
        Command::Hint => {
            let example = codec.hint(&locale)?;
            if config.json {
                print_json(&json!({ "locale": locale, "example": example }))?;
            } else {
                println!("{}", example);
            }
        }
        Command::Symbols => print_symbols(&codec, &locale, config.json)?,
        Command::Locales => print_locales(config.json)?,
    }

    Ok(())
}

fn print_symbols(codec: &AmountTextCodec<SymbolTable>, locale: &LocaleId, as_json: bool) -> Result<()> {
    let symbols = codec.symbols(locale)?;
    if as_json {
        return print_json(&symbols);
    }

    let currency = &symbols.currency;
    println!("locale:          {}", symbols.locale);
    println!("decimal:         {:?} (U+{:04X})", symbols.separators.decimal, symbols.separators.decimal as u32);
    println!("grouping:        {:?} (U+{:04X})", symbols.separators.grouping, symbols.separators.grouping as u32);
    println!("currency symbol: {}", currency.symbol);
    println!("placement:       {:?}", currency.placement);
    println!("fraction digits: {}", currency.fraction_digits);
    println!("example:         {}", codec.hint(locale)?);
    Ok(())
}

fn print_locales(as_json: bool) -> Result<()> {
    if as_json {
        return print_json(&BuiltinSymbols::supported_locales());
    }
    for tag in BuiltinSymbols::supported_tags() {
        println!("{}", tag);
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
