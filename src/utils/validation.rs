use crate::domain::model::{LocaleId, SeparatorSet};
use crate::utils::error::{CodecError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_locale_tag(field_name: &str, tag: &str) -> Result<LocaleId> {
    tag.parse().map_err(|e: CodecError| CodecError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: tag.to_string(),
        reason: e.to_string(),
    })
}

/// Separators must not be ASCII digits, and must be distinct unless
/// `allow_collision` is set.
pub fn validate_separators(
    field_name: &str,
    separators: &SeparatorSet,
    allow_collision: bool,
) -> Result<()> {
    for (role, c) in [("decimal", separators.decimal), ("grouping", separators.grouping)] {
        if c.is_ascii_digit() {
            return Err(CodecError::InvalidConfigValueError {
                field: format!("{}.{}", field_name, role),
                value: c.to_string(),
                reason: "Separator cannot be a digit".to_string(),
            });
        }
    }

    if separators.collides() && !allow_collision {
        return Err(CodecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: separators.decimal.to_string(),
            reason: "Decimal and grouping separator are the same character".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CodecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CodecError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
