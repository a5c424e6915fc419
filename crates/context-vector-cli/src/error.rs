//! Error types for the ctxvec CLI

use context_vector_core::{ContextError, ValidationError};
use thiserror::Error;

use crate::ExitCode;

/// Main error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Configuration file could not be loaded
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The snapshot failed validation
    #[error("{0}")]
    Rejected(#[from] ValidationError),

    /// Serialization error while writing output
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CliError {
    /// Exit code reported for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Rejected(_) => ExitCode::ValidationFailed,
            CliError::InvalidInput(_) | CliError::ConfigError(_) => ExitCode::InvalidInput,
            CliError::FileError(_) => ExitCode::FileError,
            CliError::SerializationError(_) => ExitCode::InternalError,
        }
    }
}

impl From<ContextError> for CliError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Validation(e) => CliError::Rejected(e),
            ContextError::Config(msg) => CliError::ConfigError(msg),
            ContextError::Io(e) => CliError::FileError(e.to_string()),
            ContextError::Serialization(msg) => CliError::SerializationError(msg),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::FileError(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::SerializationError(format!("YAML error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use context_vector_core::{RuleCategory, Violation};

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::InvalidInput("x".to_string()).exit_code(),
            ExitCode::InvalidInput
        );
        assert_eq!(
            CliError::FileError("x".to_string()).exit_code(),
            ExitCode::FileError
        );
        let rejected = CliError::Rejected(ValidationError::single(Violation::new(
            "inference.activity",
            RuleCategory::Bounds,
            "[0.0, 1.0]",
            "2.0",
        )));
        assert_eq!(rejected.exit_code(), ExitCode::ValidationFailed);
    }

    #[test]
    fn test_from_context_error() {
        let err: CliError = ContextError::Config("bad key".to_string()).into();
        assert!(matches!(err, CliError::ConfigError(_)));
        assert_eq!(err.exit_code(), ExitCode::InvalidInput);
    }
}
