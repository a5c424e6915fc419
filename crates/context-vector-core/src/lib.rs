//! Context Vector Schema
//!
//! Structured snapshots of user/system context: semantic interest weights,
//! temporal activity, preference settings, a cognitive-activity signal and
//! an emotional-affect signal.
//!
//! ## Architecture
//!
//! 1. **Signals** (`signal`): `InferenceSignal`, `AffectSignal` and the
//!    closed `Focus` enumeration.
//!
//! 2. **Vector** (`vector`): the `ContextVector` aggregate and its unvalidated
//!    draft, `ContextVectorParts`.
//!
//! 3. **Validation** (`validation`): range and enumeration checks that
//!    collect every violation in one pass.
//!
//! 4. **Codec** (`codec`): versioned, deterministic JSON/YAML encoding and
//!    SHA-256 fingerprints.
//!
//! 5. **Publish** (`publish`): replace-only sharing of snapshots between a
//!    producer and any number of consumers.
//!
//! 6. **Config** (`config`): TOML-loaded validation policy, timestamp unit
//!    and default encoding.
//!
//! Producers and consumers of context vectors live outside this crate. A
//! `ContextVector` can only be obtained through validation, so consumers can
//! rely on its invariants without re-checking.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use context_vector_core::{
//!     codec, AffectSignal, ContextVector, Focus, InferenceSignal, TemporalContext,
//!     UserPreferenceContext,
//! };
//!
//! let vector = ContextVector::new(
//!     BTreeMap::from([("coding".to_string(), 0.8)]),
//!     TemporalContext::new(1_700_000_000, 3.2),
//!     UserPreferenceContext::new(0.4, 0.6),
//!     InferenceSignal::new(0.9),
//!     AffectSignal::new(0.5, 0.2, Focus::Focused),
//! )
//! .unwrap();
//!
//! let json = codec::to_json(&vector).unwrap();
//! assert_eq!(codec::from_json(&json).unwrap(), vector);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod publish;
pub mod signal;
pub mod validation;
pub mod vector;

pub use codec::{decode, encode, fingerprint, Encoding, SCHEMA_VERSION};
pub use config::SchemaConfig;
pub use error::{ContextError, Result, ValidationError};
pub use publish::{PublisherClosed, SnapshotPublisher, SnapshotSubscriber};
pub use signal::{AffectParts, AffectSignal, Focus, InferenceSignal, UnknownFocus};
pub use validation::{
    RuleCategory, SemanticWeightPolicy, Validate, ValidationPolicy, ValidationReport, Violation,
};
pub use vector::{
    ContextVector, ContextVectorParts, SemanticContext, TemporalContext, TimestampUnit,
    UserPreferenceContext,
};
