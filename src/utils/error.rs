use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// The text is not a usable amount for the locale. `example` is the
    /// locale rendering of the sentinel amount, meant to be shown to the user.
    #[error("Invalid amount '{input}', expected a value like {example}")]
    InvalidFormat { input: String, example: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// End-user input that can be corrected and resubmitted.
    Input,
    /// Misuse at the call site.
    Caller,
    Configuration,
    System,
}

impl CodecError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CodecError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CodecError::InvalidFormat { .. } => ErrorCategory::Input,
            CodecError::InvalidArgument { .. } => ErrorCategory::Caller,
            CodecError::ConfigValidationError { .. }
            | CodecError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CodecError::IoError(_) | CodecError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// The locale example carried by `InvalidFormat`, if any.
    pub fn example(&self) -> Option<&str> {
        match self {
            CodecError::InvalidFormat { example, .. } => Some(example),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CodecError::InvalidFormat { example, .. } => {
                format!("Please enter the amount like this: {}", example)
            }
            CodecError::InvalidArgument { message } => message.clone(),
            CodecError::ConfigValidationError { field, .. }
            | CodecError::InvalidConfigValueError { field, .. } => {
                format!("The configuration value '{}' is not valid: {}", field, self)
            }
            CodecError::IoError(e) => format!("Could not read input: {}", e),
            CodecError::SerializationError(e) => format!("Could not write output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Re-enter the amount using only digits and the locale separators",
            ErrorCategory::Caller => "Check the locale tag and that a value was supplied",
            ErrorCategory::Configuration => "Fix the configuration file and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::Caller | ErrorCategory::Configuration => 1,
            ErrorCategory::System => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
