use crate::core::codec::{AmountTextCodec, CodecOptions, CollisionPolicy, EmptyInputPolicy};
use crate::core::locale::{SymbolOverride, SymbolTable};
use crate::domain::model::LocaleId;
use crate::domain::ports::SymbolProvider;
use crate::utils::error::{CodecError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Codec configuration file.
///
/// ```toml
/// [codec]
/// default_locale = "de-DE"
/// on_empty = "zero_value"
/// separator_collision = "preserve"
///
/// [symbols.de-DE]
/// decimal = ","
/// grouping = "."
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub codec: CodecSection,
    #[serde(default)]
    pub symbols: BTreeMap<String, SymbolOverride>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodecSection {
    pub default_locale: Option<String>,
    #[serde(default)]
    pub on_empty: EmptyInputPolicy,
    #[serde(default)]
    pub separator_collision: CollisionPolicy,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CodecError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CodecError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${AMOUNT_LOCALE})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn options(&self) -> CodecOptions {
        CodecOptions {
            on_empty: self.codec.on_empty,
            separator_collision: self.codec.separator_collision,
        }
    }

    pub fn default_locale(&self) -> Result<Option<LocaleId>> {
        self.codec
            .default_locale
            .as_deref()
            .map(|tag| validation::validate_locale_tag("codec.default_locale", tag))
            .transpose()
    }

    /// Built-in symbols with this file's overrides applied.
    pub fn symbol_table(&self) -> Result<SymbolTable> {
        let mut table = SymbolTable::new();
        for (tag, patch) in &self.symbols {
            let field = format!("symbols.{}", tag);
            let locale = validation::validate_locale_tag(&field, tag)?;
            table = table
                .with_override(&locale, patch.clone())
                .map_err(|e| CodecError::InvalidConfigValueError {
                    field,
                    value: tag.clone(),
                    reason: e.to_string(),
                })?;
        }
        Ok(table)
    }

    pub fn build_codec(&self) -> Result<AmountTextCodec<SymbolTable>> {
        Ok(AmountTextCodec::with_provider(self.symbol_table()?, self.options()))
    }

    pub fn validate_config(&self) -> Result<()> {
        let default_locale = self.default_locale()?;
        let table = self.symbol_table()?;

        if let Some(locale) = &default_locale {
            table
                .symbols(locale)
                .map_err(|e| CodecError::InvalidConfigValueError {
                    field: "codec.default_locale".to_string(),
                    value: locale.to_string(),
                    reason: e.to_string(),
                })?;
        }

        let allow_collision = self.codec.separator_collision == CollisionPolicy::Preserve;
        for (tag, patch) in &self.symbols {
            let field = format!("symbols.{}", tag);
            let locale = validation::validate_locale_tag(&field, tag)?;
            let merged = table.symbols(&locale)?;

            validation::validate_separators(&field, &merged.separators, allow_collision)?;
            if merged.separators.collides() {
                tracing::warn!(
                    "{}: decimal and grouping separator are both '{}'",
                    field,
                    merged.separators.decimal
                );
            }

            if let Some(symbol) = &patch.currency_symbol {
                validation::validate_non_empty_string(&format!("{}.currency_symbol", field), symbol)?;
            }
            if let Some(digits) = patch.fraction_digits {
                validation::validate_range(&format!("{}.fraction_digits", field), digits, 0, 4)?;
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SeparatorSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[codec]
default_locale = "de-DE"
on_empty = "reject"

[symbols.de-DE]
grouping = "'"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.codec.on_empty, EmptyInputPolicy::Reject);
        assert_eq!(config.codec.separator_collision, CollisionPolicy::Preserve);
        assert_eq!(config.default_locale().unwrap().unwrap().to_string(), "de-DE");
        assert!(config.validate().is_ok());

        let table = config.symbol_table().unwrap();
        let symbols = table.symbols(&"de-DE".parse().unwrap()).unwrap();
        assert_eq!(symbols.separators, SeparatorSet::new(',', '\''));
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.options(), CodecOptions::default());
        assert!(config.default_locale().unwrap().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AMOUNT_CODEC_TEST_LOCALE", "fr-FR");

        let toml_content = r#"
[codec]
default_locale = "${AMOUNT_CODEC_TEST_LOCALE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.codec.default_locale.as_deref(), Some("fr-FR"));

        std::env::remove_var("AMOUNT_CODEC_TEST_LOCALE");
    }

    #[test]
    fn test_collision_depends_on_policy() {
        let preserve = TomlConfig::from_toml_str(
            r#"
[symbols.de-DE]
decimal = "."
grouping = "."
"#,
        )
        .unwrap();
        assert!(preserve.validate().is_ok());

        let reject = TomlConfig::from_toml_str(
            r#"
[codec]
separator_collision = "reject"

[symbols.de-DE]
decimal = "."
grouping = "."
"#,
        )
        .unwrap();
        assert!(reject.validate().is_err());
    }

    #[test]
    fn test_config_validation_errors() {
        let unknown_locale = TomlConfig::from_toml_str("[symbols.xx-YY]\ndecimal = \",\"\n").unwrap();
        assert!(matches!(
            unknown_locale.validate(),
            Err(CodecError::InvalidConfigValueError { .. })
        ));

        let bad_digits = TomlConfig::from_toml_str("[symbols.en-US]\nfraction_digits = 9\n").unwrap();
        assert!(bad_digits.validate().is_err());

        let bad_default = TomlConfig::from_toml_str("[codec]\ndefault_locale = \"ko-KR\"\n").unwrap();
        assert!(bad_default.validate().is_err());

        assert!(TomlConfig::from_toml_str("[codec]\non_empty = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[codec]\ndefault_locale = \"ja\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.default_locale().unwrap().unwrap().to_string(), "ja");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/nonexistent/amount-codec.toml").unwrap_err();
        assert!(matches!(err, CodecError::IoError(_)));
    }
}
