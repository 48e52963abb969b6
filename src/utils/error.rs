use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid input data: {message}")]
    InvalidInput { message: String },

    #[error("Invalid analysis options: {message}")]
    InvalidOptions { message: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::SerializationError(_) => ErrorCategory::Input,
            Self::InvalidOptions { .. }
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::Storage,
            Self::ZipError(_) | Self::CsvError(_) | Self::ProcessingError { .. } => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => {
                "Check that sellers, products and purchase_records are non-empty JSON arrays"
            }
            Self::SerializationError(_) => "Check the dataset JSON for malformed records",
            Self::InvalidOptions { .. } => {
                "Supply both a revenue policy and a bonus policy (e.g. 'simple' and 'by_profit')"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review the configuration file or CLI arguments",
            Self::IoError(_) => "Verify that the input files exist and the output path is writable",
            Self::ZipError(_) | Self::CsvError(_) => "Retry, or disable compression / CSV output",
            Self::ProcessingError { .. } => "Check the report rows for unexpected characters",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("The sales dataset could not be used: {}", self),
            ErrorCategory::Configuration => format!("The report is misconfigured: {}", self),
            ErrorCategory::Storage => format!("A file could not be read or written: {}", self),
            ErrorCategory::Output => format!("The report could not be written: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
