use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("Dataset is empty: no employee records to analyze")]
    EmptyDataset,

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Run cannot start at stage '{actual}', expected '{expected}'")]
    InvalidRunState { expected: String, actual: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::InputNotFound { .. } => ErrorCategory::Input,
            ReportError::MalformedRecord { .. } | ReportError::EmptyDataset => ErrorCategory::Data,
            ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ReportError::InvalidRunState { .. }
            | ReportError::IoError(_)
            | ReportError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::InputNotFound { path } => format!("ERROR: {} not found!", path),
            ReportError::MalformedRecord { line, reason } => {
                format!("The input data is invalid at line {}: {}", line, reason)
            }
            ReportError::EmptyDataset => {
                "The input file contains no employee records".to_string()
            }
            ReportError::ConfigValidationError { field, message } => {
                format!("Configuration problem with '{}': {}", field, message)
            }
            ReportError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            ReportError::InvalidRunState { expected, actual } => format!(
                "The report engine was at stage '{}' but a run needs stage '{}'",
                actual, expected
            ),
            ReportError::IoError(e) => format!("A file operation failed: {}", e),
            ReportError::SerializationError(e) => format!("Could not serialize output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::InputNotFound { .. } => {
                "Check the --input path or the [input] section of the config file"
            }
            ReportError::MalformedRecord { .. } => {
                "Make sure the file has Name, Department and Score columns and every Score is a whole number"
            }
            ReportError::EmptyDataset => "Add at least one employee row below the header",
            ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            ReportError::InvalidRunState { .. } => "Create a new engine for each run",
            ReportError::IoError(_) => "Check that the output location is writable",
            ReportError::SerializationError(_) => "Run again with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
