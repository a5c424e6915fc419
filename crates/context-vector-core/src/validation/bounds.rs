//! Numeric range checks
//!
//! Every real-valued field of a context vector is checked against a closed
//! interval (or a half-open lower bound). Non-finite values never satisfy a
//! range, so they are reported separately from ordinary out-of-range values.

/// Closed numeric bounds; either end may be open-ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBounds {
    /// Minimum value (inclusive)
    pub min: Option<f64>,
    /// Maximum value (inclusive)
    pub max: Option<f64>,
}

/// `[0.0, 1.0]`: activity, arousal, verbosity, detail level
pub const UNIT_INTERVAL: NumericBounds = NumericBounds::closed(0.0, 1.0);

/// `[-1.0, 1.0]`: valence
pub const SIGNED_UNIT_INTERVAL: NumericBounds = NumericBounds::closed(-1.0, 1.0);

/// `>= 0.0`: interaction frequency
pub const NON_NEGATIVE: NumericBounds = NumericBounds::at_least(0.0);

impl NumericBounds {
    /// Create unbounded bounds (only finiteness is checked)
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Create `[min, max]`
    pub const fn closed(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Create `>= min`
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Check if a value is within bounds
    pub fn check(&self, value: f64) -> BoundsCheckResult {
        if !value.is_finite() {
            return BoundsCheckResult::NotFinite { value };
        }

        if let Some(min) = self.min {
            if value < min {
                return BoundsCheckResult::BelowMinimum { value, min };
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return BoundsCheckResult::AboveMaximum { value, max };
            }
        }

        BoundsCheckResult::WithinBounds
    }

    /// Whether `value` satisfies these bounds
    pub fn contains(&self, value: f64) -> bool {
        matches!(self.check(value), BoundsCheckResult::WithinBounds)
    }

    /// Get a description of the bounds, used as the expected constraint in violations
    pub fn describe(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("[{:?}, {:?}]", min, max),
            (Some(min), None) => format!(">= {:?}", min),
            (None, Some(max)) => format!("<= {:?}", max),
            (None, None) => "finite number".to_string(),
        }
    }
}

/// Result of a bounds check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsCheckResult {
    WithinBounds,
    NotFinite { value: f64 },
    BelowMinimum { value: f64, min: f64 },
    AboveMaximum { value: f64, max: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_interval_endpoints_are_inclusive() {
        assert!(UNIT_INTERVAL.contains(0.0));
        assert!(UNIT_INTERVAL.contains(1.0));
        assert!(UNIT_INTERVAL.contains(0.5));
    }

    #[test]
    fn test_unit_interval_rejects_just_outside() {
        assert_eq!(
            UNIT_INTERVAL.check(1.0000001),
            BoundsCheckResult::AboveMaximum {
                value: 1.0000001,
                max: 1.0
            }
        );
        assert_eq!(
            UNIT_INTERVAL.check(-0.0001),
            BoundsCheckResult::BelowMinimum {
                value: -0.0001,
                min: 0.0
            }
        );
    }

    #[test]
    fn test_non_finite_never_within_bounds() {
        for bounds in [UNIT_INTERVAL, NON_NEGATIVE, NumericBounds::unbounded()] {
            assert!(matches!(
                bounds.check(f64::NAN),
                BoundsCheckResult::NotFinite { .. }
            ));
            assert!(!bounds.contains(f64::INFINITY));
            assert!(!bounds.contains(f64::NEG_INFINITY));
        }
    }

    #[test]
    fn test_non_negative_has_no_upper_bound() {
        assert!(NON_NEGATIVE.contains(0.0));
        assert!(NON_NEGATIVE.contains(1.0e9));
        assert!(!NON_NEGATIVE.contains(-1.0e-9));
    }

    #[test]
    fn test_describe() {
        assert_eq!(UNIT_INTERVAL.describe(), "[0.0, 1.0]");
        assert_eq!(SIGNED_UNIT_INTERVAL.describe(), "[-1.0, 1.0]");
        assert_eq!(NON_NEGATIVE.describe(), ">= 0.0");
        assert_eq!(NumericBounds::unbounded().describe(), "finite number");
    }
}
