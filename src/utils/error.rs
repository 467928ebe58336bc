use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("CSV content is empty")]
    EmptyContent,

    #[error("Content does not appear to be CSV format")]
    NotCsvFormat,

    #[error("No headers found in CSV")]
    NoHeaders,

    #[error("No data rows found in CSV")]
    NoDataRows,

    #[error("Failed to parse CSV: {message}")]
    ParseFailure { message: String },

    #[error("No valid data found in CSV file")]
    NoValidData,

    #[error("Input is not valid UTF-8 text: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("CSV writing error: {0}")]
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Content,
    Io,
    Serialization,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IntakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IntakeError::EmptyContent
            | IntakeError::NotCsvFormat
            | IntakeError::NoHeaders
            | IntakeError::NoDataRows
            | IntakeError::ParseFailure { .. }
            | IntakeError::NoValidData
            | IntakeError::InvalidEncoding(_) => ErrorCategory::Content,
            IntakeError::IoError(_) => ErrorCategory::Io,
            IntakeError::CsvError(_) | IntakeError::SerializationError(_) => {
                ErrorCategory::Serialization
            }
            IntakeError::ConfigError { .. }
            | IntakeError::ConfigValidationError { .. }
            | IntakeError::InvalidConfigValueError { .. }
            | IntakeError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Content => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Serialization => ErrorSeverity::Critical,
        }
    }

    /// 是否為內容檢查 (validator) 產生的錯誤
    pub fn is_content_error(&self) -> bool {
        self.category() == ErrorCategory::Content
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            IntakeError::EmptyContent => "The uploaded file is empty.".to_string(),
            IntakeError::NotCsvFormat => {
                "The uploaded file does not look like a CSV file.".to_string()
            }
            IntakeError::NoHeaders => "The CSV file has no header row.".to_string(),
            IntakeError::NoDataRows => {
                "The CSV file only contains a header row, no asset requests.".to_string()
            }
            IntakeError::NoValidData => "No valid data found in CSV file.".to_string(),
            IntakeError::InvalidEncoding(_) => {
                "The file could not be read as text (expected UTF-8).".to_string()
            }
            IntakeError::IoError(e) => format!("Could not read or write a file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            IntakeError::EmptyContent | IntakeError::NoHeaders => {
                "Export the sheet again and make sure the first row holds the column names"
            }
            IntakeError::NotCsvFormat | IntakeError::ParseFailure { .. } => {
                "Save the file as comma-separated values (.csv) and try again"
            }
            IntakeError::NoDataRows | IntakeError::NoValidData => {
                "Add at least one asset request row below the header row"
            }
            IntakeError::InvalidEncoding(_) => "Re-export the file with UTF-8 encoding",
            IntakeError::IoError(_) => "Check that the paths exist and are writable",
            IntakeError::CsvError(_) | IntakeError::SerializationError(_) => {
                "Check the output directory and disk space"
            }
            IntakeError::ConfigError { .. }
            | IntakeError::ConfigValidationError { .. }
            | IntakeError::InvalidConfigValueError { .. }
            | IntakeError::MissingConfigError { .. } => {
                "Review the configuration file or command-line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_errors_are_medium_severity() {
        assert_eq!(IntakeError::EmptyContent.severity(), ErrorSeverity::Medium);
        assert_eq!(IntakeError::NoDataRows.category(), ErrorCategory::Content);
        assert!(IntakeError::NotCsvFormat.is_content_error());
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = IntakeError::MissingConfigError {
            field: "source.path".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(!err.is_content_error());
        assert_eq!(err.to_string(), "Missing required configuration: source.path");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: IntakeError = io.into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("missing.csv"));
    }
}
