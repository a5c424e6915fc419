//! The context vector aggregate
//!
//! A [`ContextVector`] is an immutable snapshot. It can only be obtained by
//! validating a [`ContextVectorParts`] draft (directly, through
//! [`ContextVector::new`], or by decoding), so every instance satisfies all
//! documented invariants and consumers never need to re-check it.

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::signal::{AffectParts, AffectSignal, InferenceSignal};
use crate::validation::bounds::{NON_NEGATIVE, UNIT_INTERVAL};
use crate::validation::{
    join_path, key_path, RuleCategory, Validate, ValidationPolicy, ValidationReport, Violation,
};

/// Topic name to relevance weight; open vocabulary, sorted by key
pub type SemanticContext = BTreeMap<String, f64>;

/// Unit of `recentActivityTimestamp`
///
/// The timestamp is stored exactly as supplied; the unit only matters when
/// converting to a calendar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampUnit {
    #[default]
    Seconds,
    Milliseconds,
}

/// Recency and frequency of interaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TemporalContext {
    /// Unix timestamp of the most recent activity
    pub recent_activity_timestamp: i64,
    /// Interactions per unit time, non-negative
    pub interaction_frequency: f64,
}

impl TemporalContext {
    pub fn new(recent_activity_timestamp: i64, interaction_frequency: f64) -> Self {
        Self {
            recent_activity_timestamp,
            interaction_frequency,
        }
    }

    /// Calendar time of the most recent activity, `None` if out of range
    pub fn recent_activity_at(&self, unit: TimestampUnit) -> Option<DateTime<Utc>> {
        match unit {
            TimestampUnit::Seconds => DateTime::from_timestamp(self.recent_activity_timestamp, 0),
            TimestampUnit::Milliseconds => {
                DateTime::from_timestamp_millis(self.recent_activity_timestamp)
            }
        }
    }
}

impl Validate for TemporalContext {
    fn collect_violations(&self, path: &str, _policy: &ValidationPolicy, report: &mut ValidationReport) {
        report.check_bounds(
            &join_path(path, "interactionFrequency"),
            self.interaction_frequency,
            &NON_NEGATIVE,
        );
    }
}

/// User preference dimensions, each in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPreferenceContext {
    /// `0.0` concise to `1.0` verbose
    pub verbosity: f64,
    /// `0.0` high-level to `1.0` detailed
    pub detail_level: f64,
}

impl UserPreferenceContext {
    pub fn new(verbosity: f64, detail_level: f64) -> Self {
        Self {
            verbosity,
            detail_level,
        }
    }
}

impl Validate for UserPreferenceContext {
    fn collect_violations(&self, path: &str, _policy: &ValidationPolicy, report: &mut ValidationReport) {
        report.check_bounds(&join_path(path, "verbosity"), self.verbosity, &UNIT_INTERVAL);
        report.check_bounds(&join_path(path, "detailLevel"), self.detail_level, &UNIT_INTERVAL);
    }
}

/// Deserialize a topic map, rejecting repeated topics instead of keeping the last
fn deserialize_semantic_context<'de, D>(deserializer: D) -> Result<SemanticContext, D::Error>
where
    D: Deserializer<'de>,
{
    struct TopicMapVisitor;

    impl<'de> Visitor<'de> for TopicMapVisitor {
        type Value = SemanticContext;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of unique topic names to weights")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut topics = SemanticContext::new();
            while let Some((topic, weight)) = access.next_entry::<String, f64>()? {
                if topics.contains_key(&topic) {
                    return Err(serde::de::Error::custom(format!(
                        "duplicate topic {:?} in semanticContext",
                        topic
                    )));
                }
                topics.insert(topic, weight);
            }
            Ok(topics)
        }
    }

    deserializer.deserialize_map(TopicMapVisitor)
}

fn collect_semantic_violations(
    semantic_context: &SemanticContext,
    path: &str,
    policy: &ValidationPolicy,
    report: &mut ValidationReport,
) {
    let bounds = policy.semantic_weights.bounds();
    let map_path = join_path(path, "semanticContext");
    for (topic, weight) in semantic_context {
        report.check_bounds(&key_path(&map_path, topic), *weight, &bounds);
    }
}

/// Unvalidated context vector draft
///
/// This is what producers assemble and what the wire format decodes into.
/// Nothing about it is guaranteed until it has been turned into a
/// [`ContextVector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContextVectorParts {
    #[serde(deserialize_with = "deserialize_semantic_context")]
    pub semantic_context: SemanticContext,
    pub temporal_context: TemporalContext,
    pub user_preference_context: UserPreferenceContext,
    pub inference: InferenceSignal,
    pub affect: AffectParts,
}

impl Validate for ContextVectorParts {
    fn collect_violations(&self, path: &str, policy: &ValidationPolicy, report: &mut ValidationReport) {
        collect_semantic_violations(&self.semantic_context, path, policy, report);
        self.temporal_context
            .collect_violations(&join_path(path, "temporalContext"), policy, report);
        self.user_preference_context
            .collect_violations(&join_path(path, "userPreferenceContext"), policy, report);
        self.inference
            .collect_violations(&join_path(path, "inference"), policy, report);
        self.affect
            .collect_violations(&join_path(path, "affect"), policy, report);
    }
}

/// Validated, immutable snapshot of user/system context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ContextVectorParts")]
pub struct ContextVector {
    semantic_context: SemanticContext,
    temporal_context: TemporalContext,
    user_preference_context: UserPreferenceContext,
    inference: InferenceSignal,
    affect: AffectSignal,
}

impl ContextVector {
    /// Build a snapshot from typed parts under the default policy
    pub fn new(
        semantic_context: SemanticContext,
        temporal_context: TemporalContext,
        user_preference_context: UserPreferenceContext,
        inference: InferenceSignal,
        affect: AffectSignal,
    ) -> Result<Self, ValidationError> {
        let parts = ContextVectorParts {
            semantic_context,
            temporal_context,
            user_preference_context,
            inference,
            affect: affect.into(),
        };
        Self::from_parts(parts, &ValidationPolicy::default())
    }

    /// Validate a draft and, if every invariant holds, freeze it into a snapshot
    pub fn from_parts(
        parts: ContextVectorParts,
        policy: &ValidationPolicy,
    ) -> Result<Self, ValidationError> {
        let report = parts.validate(policy);
        if !report.is_valid() {
            warn!(
                violations = report.violations.len(),
                "Rejected context vector"
            );
            return Err(ValidationError::new(report.violations));
        }

        let affect = parts.affect.to_signal().ok_or_else(|| {
            ValidationError::single(Violation::new(
                "affect.focus",
                RuleCategory::Enum,
                crate::signal::Focus::expected(),
                format!("{:?}", parts.affect.focus),
            ))
        })?;

        debug!(
            topics = parts.semantic_context.len(),
            focus = %affect.focus,
            "Accepted context vector"
        );

        Ok(Self {
            semantic_context: parts.semantic_context,
            temporal_context: parts.temporal_context,
            user_preference_context: parts.user_preference_context,
            inference: parts.inference,
            affect,
        })
    }

    pub fn semantic_context(&self) -> &SemanticContext {
        &self.semantic_context
    }

    /// Relevance weight of a single topic
    pub fn semantic_weight(&self, topic: &str) -> Option<f64> {
        self.semantic_context.get(topic).copied()
    }

    pub fn temporal_context(&self) -> &TemporalContext {
        &self.temporal_context
    }

    pub fn user_preference_context(&self) -> &UserPreferenceContext {
        &self.user_preference_context
    }

    pub fn inference(&self) -> &InferenceSignal {
        &self.inference
    }

    pub fn affect(&self) -> &AffectSignal {
        &self.affect
    }

    /// Copy back into an editable draft, e.g. to derive the next snapshot
    pub fn to_parts(&self) -> ContextVectorParts {
        self.clone().into_parts()
    }

    pub fn into_parts(self) -> ContextVectorParts {
        ContextVectorParts {
            semantic_context: self.semantic_context,
            temporal_context: self.temporal_context,
            user_preference_context: self.user_preference_context,
            inference: self.inference,
            affect: self.affect.into(),
        }
    }
}

impl Validate for ContextVector {
    fn collect_violations(&self, path: &str, policy: &ValidationPolicy, report: &mut ValidationReport) {
        collect_semantic_violations(&self.semantic_context, path, policy, report);
        self.temporal_context
            .collect_violations(&join_path(path, "temporalContext"), policy, report);
        self.user_preference_context
            .collect_violations(&join_path(path, "userPreferenceContext"), policy, report);
        self.inference
            .collect_violations(&join_path(path, "inference"), policy, report);
        self.affect
            .collect_violations(&join_path(path, "affect"), policy, report);
    }
}

impl TryFrom<ContextVectorParts> for ContextVector {
    type Error = ValidationError;

    fn try_from(parts: ContextVectorParts) -> Result<Self, Self::Error> {
        Self::from_parts(parts, &ValidationPolicy::default())
    }
}
