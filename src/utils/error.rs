use crate::adapters::ocr::DecodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeriodError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("OCR record rejected: {0}")]
    DecodeError(#[from] DecodeError),

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

    #[error("Payout service returned {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PeriodError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PeriodError::ConfigError { .. }
            | PeriodError::ConfigValidationError { .. }
            | PeriodError::InvalidConfigValueError { .. }
            | PeriodError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PeriodError::CsvError(_)
            | PeriodError::SerializationError(_)
            | PeriodError::DecodeError(_)
            | PeriodError::ProcessingError { .. } => ErrorCategory::Input,
            PeriodError::ApiError(_) | PeriodError::ServiceError { .. } => ErrorCategory::Network,
            PeriodError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 遠端服務暫時失敗，可重試
            PeriodError::ApiError(_) => ErrorSeverity::Medium,
            PeriodError::ServiceError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            PeriodError::ServiceError { .. } => ErrorSeverity::High,
            PeriodError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PeriodError::ApiError(_) => {
                "Could not reach the payout calculation service".to_string()
            }
            PeriodError::ServiceError { status, .. } => {
                format!("The payout calculation service refused the request (HTTP {})", status)
            }
            PeriodError::CsvError(e) => format!("The CSV period file could not be read: {}", e),
            PeriodError::SerializationError(e) => {
                format!("The JSON period file could not be read: {}", e)
            }
            PeriodError::DecodeError(e) => format!("Extracted period data is malformed: {}", e),
            PeriodError::IoError(e) => format!("File system error: {}", e),
            PeriodError::ConfigError { .. }
            | PeriodError::ConfigValidationError { .. }
            | PeriodError::InvalidConfigValueError { .. }
            | PeriodError::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            PeriodError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the TOML configuration file against the documented keys",
            ErrorCategory::Input => "Check that every record has start_date, end_date and monthly_salary",
            ErrorCategory::Network => "Check the service endpoint and try again later",
            ErrorCategory::System => "Check that the input path exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, PeriodError>;
