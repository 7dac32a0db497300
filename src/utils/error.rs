use crate::domain::model::InvalidReason;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpfError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid CPF '{input}': {reason}")]
    InvalidCpf { input: String, reason: InvalidReason },

    #[error("Invalid CPF base '{input}': expected exactly 9 digits, found {digits}")]
    InvalidBase { input: String, digits: usize },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Validation,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CpfError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CpfError::IoError(_) => ErrorCategory::Io,
            CpfError::ConfigError { .. }
            | CpfError::MissingConfigError { .. }
            | CpfError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CpfError::InvalidCpf { .. } | CpfError::InvalidBase { .. } => {
                ErrorCategory::Validation
            }
            CpfError::CsvError(_)
            | CpfError::SerializationError(_)
            | CpfError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CpfError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            CpfError::ConfigError { .. } => "Check the configuration file syntax".to_string(),
            CpfError::MissingConfigError { field } => {
                format!("Add the '{}' setting to the configuration", field)
            }
            CpfError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
            CpfError::InvalidCpf { reason, .. } => match reason {
                InvalidReason::IncompleteInput => {
                    "Enter all 11 digits of the CPF (9 for a base number)".to_string()
                }
                InvalidReason::RepeatedDigitSequence => {
                    "Sequences like 111.111.111-11 are never valid CPFs".to_string()
                }
                InvalidReason::ChecksumMismatch => {
                    "Re-check the digits, one of them was probably mistyped".to_string()
                }
            },
            CpfError::InvalidBase { .. } => {
                "Enter only the first 9 digits; the check digits are computed".to_string()
            }
            CpfError::CsvError(_) | CpfError::SerializationError(_) => {
                "Retry with a different output format".to_string()
            }
            CpfError::ProcessingError { .. } => "Re-run with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CpfError::IoError(e) => format!("Could not read or write a file: {}", e),
            CpfError::InvalidCpf { input, reason } => format!("'{}' is not a valid CPF: {}", input, reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CpfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_cpf_is_low_severity() {
        let err = CpfError::InvalidCpf {
            input: "1234".to_string(),
            reason: InvalidReason::IncompleteInput,
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().contains("exactly 11 digits"));
    }

    #[test]
    fn test_invalid_base_mentions_nine_digits() {
        let err = CpfError::InvalidBase {
            input: "1234567890".to_string(),
            digits: 10,
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().contains("exactly 9 digits"));
        assert!(!err.user_friendly_message().contains("11 digits"));
    }

    #[test]
    fn test_config_errors_are_medium() {
        let err = CpfError::MissingConfigError {
            field: "input.path".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("input.path"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CpfError = io.into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
