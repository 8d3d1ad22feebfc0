//! Advisory review results for rule sets.
//!
//! A review never rejects a rule set. It carries the normalized rules and any
//! warnings an operator should look at before committing an edit.

use serde::{Deserialize, Serialize};

use super::RuleSet;

/// The kind of suspicious configuration a review found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleWarningKind {
    /// A rule with strictly larger dimensions allows less weight than a
    /// rule with smaller dimensions.
    MonotonicityViolation,
    /// Two rules are larger on one axis and smaller on another, so neither
    /// tier contains the other.
    MismatchedDimensions,
}

impl RuleWarningKind {
    /// A stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            RuleWarningKind::MonotonicityViolation => "MONOTONICITY_VIOLATION",
            RuleWarningKind::MismatchedDimensions => "MISMATCHED_DIMENSIONS",
        }
    }
}

/// A single advisory finding about a pair of rules.
///
/// Indices refer to positions in the normalized, ordered rule set of the
/// review that produced the warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleWarning {
    /// What was found.
    pub kind: RuleWarningKind,
    /// A code identifying the type of warning.
    pub code: String,
    /// Position of the first rule involved.
    pub first_index: usize,
    /// Position of the second rule involved.
    pub second_index: usize,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The result of normalizing and ordering a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetReview {
    /// The normalized, ordered rules.
    pub rules: RuleSet,
    /// Advisory warnings; empty when the set looks consistent.
    pub warnings: Vec<RuleWarning>,
}

impl RuleSetReview {
    /// Returns true if the review raised no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&RuleWarningKind::MonotonicityViolation).unwrap(),
            "\"monotonicity_violation\""
        );
        assert_eq!(
            serde_json::to_string(&RuleWarningKind::MismatchedDimensions).unwrap(),
            "\"mismatched_dimensions\""
        );
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(
            RuleWarningKind::MonotonicityViolation.code(),
            "MONOTONICITY_VIOLATION"
        );
        assert_eq!(
            RuleWarningKind::MismatchedDimensions.code(),
            "MISMATCHED_DIMENSIONS"
        );
    }

    #[test]
    fn test_empty_review_is_clean() {
        let review = RuleSetReview {
            rules: RuleSet::empty(),
            warnings: vec![],
        };
        assert!(review.is_clean());
    }
}
