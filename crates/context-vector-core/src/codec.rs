//! Versioned wire format
//!
//! A snapshot is wrapped in an envelope carrying the schema version:
//!
//! ```json
//! {"schemaVersion":1,"contextVector":{"semanticContext":{"coding":0.8}, ...}}
//! ```
//!
//! Encoding is deterministic: struct fields are written in declaration order,
//! `semanticContext` keys in sorted order, and floats in shortest round-trip
//! form. Decoding parses into an unvalidated draft and then runs the same
//! validation as construction, so malformed and out-of-range documents both
//! fail with [`ValidationError`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::validation::{RuleCategory, ValidationPolicy, Violation};
use crate::vector::{ContextVector, ContextVectorParts};

/// Current wire schema version
pub const SCHEMA_VERSION: u64 = 1;

/// Supported text encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Compact JSON; the canonical form
    #[default]
    Json,
    Yaml,
}

impl Encoding {
    /// Pick an encoding from a file extension (case-insensitive)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "json" => Some(Encoding::Json),
            "yaml" | "yml" => Some(Encoding::Yaml),
            _ => None,
        }
    }

    /// Pick an encoding from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Json => write!(f, "json"),
            Encoding::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a> {
    schema_version: u64,
    context_vector: &'a ContextVector,
}

/// Reads only the version so unknown versions are reported before body errors
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionProbe {
    schema_version: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Envelope {
    #[allow(dead_code)]
    schema_version: u64,
    context_vector: ContextVectorParts,
}

/// Encode a snapshot
pub fn encode(vector: &ContextVector, encoding: Encoding) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        context_vector: vector,
    };

    let bytes = match encoding {
        Encoding::Json => serde_json::to_vec(&envelope)?,
        Encoding::Yaml => serde_yaml::to_string(&envelope)?.into_bytes(),
    };

    debug!(%encoding, bytes = bytes.len(), "Encoded context vector");
    Ok(bytes)
}

/// Decode and validate a snapshot
pub fn decode(
    bytes: &[u8],
    encoding: Encoding,
    policy: &ValidationPolicy,
) -> std::result::Result<ContextVector, ValidationError> {
    let probe: VersionProbe = parse(bytes, encoding)?;
    if probe.schema_version.as_u64() != Some(SCHEMA_VERSION) {
        return Err(ValidationError::single(Violation::new(
            "schemaVersion",
            RuleCategory::Version,
            SCHEMA_VERSION.to_string(),
            probe.schema_version.to_string(),
        )));
    }

    let envelope: Envelope = parse(bytes, encoding)?;
    let vector = ContextVector::from_parts(envelope.context_vector, policy)?;
    debug!(%encoding, "Decoded context vector");
    Ok(vector)
}

fn parse<T: DeserializeOwned>(
    bytes: &[u8],
    encoding: Encoding,
) -> std::result::Result<T, ValidationError> {
    let expected = format!(
        "{} context vector document (schema version {})",
        encoding, SCHEMA_VERSION
    );
    let parsed = match encoding {
        Encoding::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
        Encoding::Yaml => serde_yaml::from_slice(bytes).map_err(|e| e.to_string()),
    };
    parsed.map_err(|detail| ValidationError::single(Violation::malformed(expected, detail)))
}

/// Encode as canonical compact JSON
pub fn to_json(vector: &ContextVector) -> Result<String> {
    Ok(serde_json::to_string(&EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        context_vector: vector,
    })?)
}

/// Decode JSON under the default validation policy
pub fn from_json(json: &str) -> std::result::Result<ContextVector, ValidationError> {
    decode(json.as_bytes(), Encoding::Json, &ValidationPolicy::default())
}

/// Hex SHA-256 of the canonical JSON encoding
///
/// Snapshots with the same encoding share a fingerprint, so consumers can
/// cache derived results by it. Equality is on values while the hash is on
/// bytes: a weight of `-0.0` compares equal to `0.0` but encodes as `-0.0`,
/// so the two snapshots get different fingerprints.
pub fn fingerprint(vector: &ContextVector) -> Result<String> {
    let json = serde_json::to_vec(&EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        context_vector: vector,
    })?;
    Ok(hex::encode(Sha256::digest(&json)))
}
