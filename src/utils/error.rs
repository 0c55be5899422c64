use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid edit '{input}': {reason}")]
    InvalidEditError { input: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PricingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PricingError::IoError(_) => ErrorCategory::Io,
            PricingError::SerializationError(_) => ErrorCategory::Data,
            PricingError::ConfigError { .. }
            | PricingError::ConfigValidationError { .. }
            | PricingError::InvalidConfigValueError { .. }
            | PricingError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PricingError::ValidationError { .. } | PricingError::InvalidEditError { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一編輯事件無法解析，其餘事件仍可套用
            PricingError::InvalidEditError { .. } => ErrorSeverity::Low,
            PricingError::ValidationError { .. } => ErrorSeverity::Medium,
            PricingError::ConfigError { .. }
            | PricingError::ConfigValidationError { .. }
            | PricingError::InvalidConfigValueError { .. }
            | PricingError::MissingConfigError { .. }
            | PricingError::SerializationError(_) => ErrorSeverity::High,
            PricingError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PricingError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            PricingError::SerializationError(_) => {
                "The stored plan record is corrupted; re-save it from a fresh pricing state"
                    .to_string()
            }
            PricingError::ConfigError { .. } | PricingError::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax and section names".to_string()
            }
            PricingError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the configuration", field)
            }
            PricingError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration or pass it on the command line", field)
            }
            PricingError::ValidationError { .. } => "Review the supplied input values".to_string(),
            PricingError::InvalidEditError { .. } => {
                "Use one of: base=<amount>, discount:<interval>=<percent>, rounding=on|off, \
                 target=<0-9>, price:<interval>=<amount>, toggle"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PricingError::IoError(e) => format!("Could not read or write plan data: {}", e),
            PricingError::SerializationError(e) => format!("Plan record is not valid JSON: {}", e),
            PricingError::ConfigError { message } => format!("Configuration problem: {}", message),
            PricingError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            PricingError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for {} ({})", value, field, reason)
            }
            PricingError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            PricingError::ValidationError { message } => message.clone(),
            PricingError::InvalidEditError { input, reason } => {
                format!("Edit '{}' was not understood: {}", input, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
