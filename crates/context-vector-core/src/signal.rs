//! Inference and affect signals
//!
//! Both signals are produced outside this crate (an activity estimator and an
//! affect-sensing pipeline) and embedded by value in every context vector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::validation::bounds::{SIGNED_UNIT_INTERVAL, UNIT_INTERVAL};
use crate::validation::{join_path, RuleCategory, Validate, ValidationPolicy, ValidationReport, Violation};

/// Cognitive activity intensity, `0.0` (minimal) to `1.0` (peak)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InferenceSignal {
    pub activity: f64,
}

impl InferenceSignal {
    pub fn new(activity: f64) -> Self {
        Self { activity }
    }
}

impl Validate for InferenceSignal {
    fn collect_violations(&self, path: &str, _policy: &ValidationPolicy, report: &mut ValidationReport) {
        report.check_bounds(&join_path(path, "activity"), self.activity, &UNIT_INTERVAL);
    }
}

/// Engagement category reported by the affect pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    Focused,
    Distracted,
    Neutral,
}

impl Focus {
    /// Every category, in wire order
    pub const ALL: [Focus; 3] = [Focus::Focused, Focus::Distracted, Focus::Neutral];

    /// Wire name of this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Focus::Focused => "focused",
            Focus::Distracted => "distracted",
            Focus::Neutral => "neutral",
        }
    }

    /// Expected-constraint text used in violations
    pub fn expected() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(Focus::as_str).collect();
        format!("one of {}", names.join(", "))
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A focus string outside the closed enumeration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown focus category {0:?}")]
pub struct UnknownFocus(pub String);

impl FromStr for Focus {
    type Err = UnknownFocus;

    // Exact match: "Focused" is not a category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|focus| focus.as_str() == s)
            .ok_or_else(|| UnknownFocus(s.to_string()))
    }
}

/// Emotional state from the affect pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffectSignal {
    /// `-1.0` (very negative) to `1.0` (very positive)
    pub valence: f64,
    /// `0.0` (calm) to `1.0` (intense)
    pub arousal: f64,
    pub focus: Focus,
}

impl AffectSignal {
    pub fn new(valence: f64, arousal: f64, focus: Focus) -> Self {
        Self {
            valence,
            arousal,
            focus,
        }
    }
}

impl Validate for AffectSignal {
    fn collect_violations(&self, path: &str, _policy: &ValidationPolicy, report: &mut ValidationReport) {
        report.check_bounds(&join_path(path, "valence"), self.valence, &SIGNED_UNIT_INTERVAL);
        report.check_bounds(&join_path(path, "arousal"), self.arousal, &UNIT_INTERVAL);
    }
}

/// Unvalidated affect record as it arrives from a producer or the wire
///
/// `focus` is still free text here; it becomes a [`Focus`] only once the
/// whole draft validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffectParts {
    pub valence: f64,
    pub arousal: f64,
    pub focus: String,
}

impl AffectParts {
    /// Convert into a typed signal; the caller must have validated first
    pub(crate) fn to_signal(&self) -> Option<AffectSignal> {
        let focus = self.focus.parse().ok()?;
        Some(AffectSignal::new(self.valence, self.arousal, focus))
    }
}

impl From<AffectSignal> for AffectParts {
    fn from(signal: AffectSignal) -> Self {
        Self {
            valence: signal.valence,
            arousal: signal.arousal,
            focus: signal.focus.as_str().to_string(),
        }
    }
}

impl Validate for AffectParts {
    fn collect_violations(&self, path: &str, policy: &ValidationPolicy, report: &mut ValidationReport) {
        let numeric = AffectSignal {
            valence: self.valence,
            arousal: self.arousal,
            focus: Focus::Neutral,
        };
        numeric.collect_violations(path, policy, report);

        if let Err(UnknownFocus(actual)) = self.focus.parse::<Focus>() {
            report.add(Violation::new(
                join_path(path, "focus"),
                RuleCategory::Enum,
                Focus::expected(),
                format!("{:?}", actual),
            ));
        }
    }
}
