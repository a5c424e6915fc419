//! Validation of context vector drafts
//!
//! Validation is a pure pass over a record: it never mutates the input and
//! collects every violation it finds rather than stopping at the first one.
//! Field paths use the wire names (`affect.focus`, `inference.activity`,
//! `semanticContext["coding"]`).

pub mod bounds;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use bounds::{BoundsCheckResult, NumericBounds};

/// Categories of violated invariants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// Numeric value outside its documented range
    Bounds,
    /// NaN or infinite value
    Finite,
    /// Value not in a closed enumeration
    Enum,
    /// Document could not be parsed into the expected shape
    Format,
    /// Unsupported wire schema version
    Version,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Bounds => write!(f, "bounds"),
            RuleCategory::Finite => write!(f, "finite"),
            RuleCategory::Enum => write!(f, "enum"),
            RuleCategory::Format => write!(f, "format"),
            RuleCategory::Version => write!(f, "version"),
        }
    }
}

/// A single failed invariant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Path to the offending field (e.g. "affect.focus")
    pub field_path: String,
    /// Category of the violated rule
    pub category: RuleCategory,
    /// Expected constraint (e.g. "[0.0, 1.0]")
    pub expected: String,
    /// Actual value supplied
    pub actual: String,
}

impl Violation {
    /// Create a new violation
    pub fn new(
        field_path: impl Into<String>,
        category: RuleCategory,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field_path: field_path.into(),
            category,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Violation for a document that could not be parsed
    pub fn malformed(expected: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new("$", RuleCategory::Format, expected, detail)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: expected {}, got {}",
            self.category, self.field_path, self.expected, self.actual
        )
    }
}

/// Outcome of a validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Every violation found, in field order
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Create an empty (passing) report
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no violations were found
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Add a violation
    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Check `value` against `bounds`, recording a violation at `path` on failure
    pub fn check_bounds(&mut self, path: &str, value: f64, bounds: &NumericBounds) {
        match bounds.check(value) {
            BoundsCheckResult::WithinBounds => {}
            BoundsCheckResult::NotFinite { value } => self.add(Violation::new(
                path,
                RuleCategory::Finite,
                bounds.describe(),
                format!("{:?}", value),
            )),
            BoundsCheckResult::BelowMinimum { value, .. }
            | BoundsCheckResult::AboveMaximum { value, .. } => self.add(Violation::new(
                path,
                RuleCategory::Bounds,
                bounds.describe(),
                format!("{:?}", value),
            )),
        }
    }

    /// Whether any violation names `field_path` exactly
    pub fn names_field(&self, field_path: &str) -> bool {
        self.violations.iter().any(|v| v.field_path == field_path)
    }

    /// Convert into a `Result`, failing when any violation was recorded
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }
}

/// Policy for `semanticContext` relevance weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticWeightPolicy {
    /// Any finite weight is accepted
    #[default]
    Open,
    /// Weights must lie in `[0.0, 1.0]`
    Unit,
}

impl SemanticWeightPolicy {
    /// Bounds applied to every weight under this policy
    pub fn bounds(&self) -> NumericBounds {
        match self {
            SemanticWeightPolicy::Open => NumericBounds::unbounded(),
            SemanticWeightPolicy::Unit => bounds::UNIT_INTERVAL,
        }
    }
}

/// Tunable parts of validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationPolicy {
    /// How `semanticContext` weights are bounded
    pub semantic_weights: SemanticWeightPolicy,
}

impl ValidationPolicy {
    /// Require every semantic weight to lie in `[0.0, 1.0]`
    pub fn strict() -> Self {
        Self {
            semantic_weights: SemanticWeightPolicy::Unit,
        }
    }
}

/// Records that can check their own invariants
///
/// Implementations append to `report` and must not stop at the first
/// violation. `path` is the prefix under which the record's fields are
/// reported; an empty prefix reports bare field names.
pub trait Validate {
    /// Append every violation of this record to `report`
    fn collect_violations(&self, path: &str, policy: &ValidationPolicy, report: &mut ValidationReport);

    /// Validate this record on its own
    fn validate(&self, policy: &ValidationPolicy) -> ValidationReport {
        let mut report = ValidationReport::new();
        self.collect_violations("", policy, &mut report);
        report
    }

    /// Whether this record satisfies every invariant
    fn is_valid(&self, policy: &ValidationPolicy) -> bool {
        self.validate(policy).is_valid()
    }
}

/// Join a parent path and a field name
pub fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

/// Path of a map entry (`parent["key"]`)
pub fn key_path(parent: &str, key: &str) -> String {
    format!("{}[{:?}]", parent, key)
}
