use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid scan target '{input}': {reason}")]
    InvalidTargetError { input: String, reason: String },

    #[error("Storage error at '{path}': {message}")]
    StorageError { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Storage,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl ScanError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScanError::ConfigError { .. }
            | ScanError::InvalidConfigValueError { .. }
            | ScanError::TomlError(_) => ErrorCategory::Configuration,
            ScanError::InvalidTargetError { .. } => ErrorCategory::Validation,
            ScanError::StorageError { .. } | ScanError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            ScanError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScanError::InvalidTargetError { input, .. } => format!(
                "'{}' is not a valid URL (e.g., https://example.com)",
                input
            ),
            ScanError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            ScanError::TomlError(_) | ScanError::ConfigError { .. } => {
                "The configuration file could not be read".to_string()
            }
            ScanError::StorageError { path, .. } => {
                format!("Scan history at '{}' could not be accessed", path)
            }
            ScanError::SerializationError(_) => "Scan history could not be encoded".to_string(),
            ScanError::IoError(_) => "A file system operation failed".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => {
                "Enter a full URL such as https://example.com or a bare domain such as example.com"
            }
            ErrorCategory::Configuration => {
                "Check the configuration file syntax and the values passed on the command line"
            }
            ErrorCategory::Storage => {
                "Check that the data directory is writable, or clear the history with `history --clear`"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
