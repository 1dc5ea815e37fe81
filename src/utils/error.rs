use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned unexpected status {status} for {endpoint}")]
    ApiStatusError { endpoint: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("Report generation failed: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    DataFormat,
    Storage,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn render(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ConfigError { .. }
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ReportError::ApiError(_) | ReportError::ApiStatusError { .. } => {
                ErrorCategory::Network
            }
            ReportError::CsvError(_) | ReportError::SerializationError(_) => {
                ErrorCategory::DataFormat
            }
            ReportError::IoError(_) | ReportError::ZipError(_) => ErrorCategory::Storage,
            ReportError::RenderError { .. } => ErrorCategory::Rendering,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常可以重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::DataFormat => ErrorSeverity::High,
            ErrorCategory::Rendering => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::ApiError(_) | ReportError::ApiStatusError { .. } => {
                "Could not fetch skill records from the remote source".to_string()
            }
            ReportError::SerializationError(_) => {
                "The skill dataset is not valid JSON or has an unexpected shape".to_string()
            }
            ReportError::IoError(e) => format!("File access failed: {}", e),
            ReportError::ConfigError { message } => message.clone(),
            ReportError::ConfigValidationError { field, message } => {
                format!("Invalid configuration in '{}': {}", field, message)
            }
            ReportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid '{}': {}", field, reason)
            }
            ReportError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            // 產生報表失敗時不透露細節，也不輸出部分檔案
            ReportError::CsvError(_) | ReportError::ZipError(_) | ReportError::RenderError { .. } => {
                "Error generating skill matrix report".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the command line flags and the TOML config file",
            ErrorCategory::Network => "Verify the source URL is reachable and try again",
            ErrorCategory::DataFormat => "Validate the dataset against the expected JSON layout",
            ErrorCategory::Storage => "Check that the output directory exists and is writable",
            ErrorCategory::Rendering => "Re-run with --verbose to see which stage failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
