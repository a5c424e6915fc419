//! Schema configuration
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! timestamp_unit = "milliseconds"
//! encoding = "yaml"
//!
//! [validation]
//! semantic_weights = "unit"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::codec::Encoding;
use crate::error::{ContextError, Result};
use crate::validation::{SemanticWeightPolicy, ValidationPolicy};
use crate::vector::TimestampUnit;

/// Configuration shared by producers, consumers and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    /// Validation policy applied on construction and decoding
    pub validation: ValidationPolicy,

    /// Unit of `recentActivityTimestamp`
    pub timestamp_unit: TimestampUnit,

    /// Default wire encoding
    pub encoding: Encoding,
}

impl SchemaConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SchemaConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to read config file");
            ContextError::Io(e)
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), ?config, "Loaded schema configuration");
        Ok(config)
    }

    /// Set the semantic weight policy
    pub fn with_semantic_weights(mut self, policy: SemanticWeightPolicy) -> Self {
        self.validation.semantic_weights = policy;
        self
    }

    /// Set the timestamp unit
    pub fn with_timestamp_unit(mut self, unit: TimestampUnit) -> Self {
        self.timestamp_unit = unit;
        self
    }

    /// Set the default encoding
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}
