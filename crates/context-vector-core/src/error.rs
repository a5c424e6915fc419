//! Error types for the context vector schema
//!
//! `ValidationError` is the only way construction and decoding fail.
//! `ContextError` adds the ambient failures (configuration files, encoding
//! output) around it.

use thiserror::Error;

use crate::validation::Violation;

/// A rejected context vector, carrying every violation found
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("context vector rejected with {} violation(s): {}", .violations.len(), summarize(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Create a validation error from a list of violations
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Create a validation error from a single violation
    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// All violations
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Take ownership of the violations
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Whether any violation names `field_path` exactly
    pub fn names_field(&self, field_path: &str) -> bool {
        self.violations.iter().any(|v| v.field_path == field_path)
    }
}

/// Main error type for schema operations other than validation
#[derive(Error, Debug)]
pub enum ContextError {
    /// Snapshot failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Encoding a snapshot failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// File access or I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContextError {
    /// Check if this is caused by caller input (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ContextError::Validation(_) | ContextError::Config(_) | ContextError::Io(_)
        )
    }
}

impl From<toml::de::Error> for ContextError {
    fn from(err: toml::de::Error) -> Self {
        ContextError::Config(format!("TOML error: {}", err))
    }
}

impl From<serde_json::Error> for ContextError {
    fn from(err: serde_json::Error) -> Self {
        ContextError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for ContextError {
    fn from(err: serde_yaml::Error) -> Self {
        ContextError::Serialization(format!("YAML error: {}", err))
    }
}

/// Result type alias for schema operations
pub type Result<T> = std::result::Result<T, ContextError>;
