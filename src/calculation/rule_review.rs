//! Rule set normalization and advisory review.
//!
//! Editing surfaces run [`normalize_and_order`] before an edited rule set
//! takes effect. It never rejects a set: suspicious configurations are
//! reported as [`RuleWarning`]s and logged, and the normalized set is
//! returned regardless.

use std::cmp::Ordering;

use tracing::{info, warn};

use crate::models::{RateRule, RuleSet, RuleSetReview, RuleWarning, RuleWarningKind};

use super::normalization::normalize_rule;

/// How two dimension vectors relate axis by axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DimensionOrder {
    Equal,
    /// At least as large on every axis and larger on one.
    Dominates,
    /// At most as large on every axis and smaller on one.
    DominatedBy,
    Incomparable,
}

fn compare_dimensions(a: [u32; 3], b: [u32; 3]) -> DimensionOrder {
    let mut larger = false;
    let mut smaller = false;

    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Greater => larger = true,
            Ordering::Less => smaller = true,
            Ordering::Equal => {}
        }
    }

    match (larger, smaller) {
        (false, false) => DimensionOrder::Equal,
        (true, false) => DimensionOrder::Dominates,
        (false, true) => DimensionOrder::DominatedBy,
        (true, true) => DimensionOrder::Incomparable,
    }
}

/// Normalizes every rule's dimension limits and orders the list.
///
/// Each rule's three limits are sorted ascending, then rules are sorted
/// (stably) by `(d0, d1, d2, weight_limit)`. The result is then reviewed
/// with [`review_rules`]. Applying this twice gives the same result as
/// applying it once.
///
/// # Example
///
/// ```
/// use parcel_rate_engine::calculation::normalize_and_order;
/// use parcel_rate_engine::models::RuleSet;
///
/// let review = normalize_and_order(&RuleSet::standard_tariff());
/// assert!(review.is_clean());
/// assert_eq!(review.rules.rules()[0].dimension_limits(), [150, 300, 300]);
/// ```
pub fn normalize_and_order(rules: &RuleSet) -> RuleSetReview {
    let mut normalized: Vec<RateRule> = rules.iter().map(normalize_rule).collect();
    normalized.sort_by_key(RateRule::sort_key);
    let normalized = RuleSet::new(normalized);

    let warnings = review_rules(&normalized);
    for warning in &warnings {
        warn!(
            code = %warning.code,
            first_index = warning.first_index,
            second_index = warning.second_index,
            "{}",
            warning.message
        );
    }

    info!(
        rule_count = normalized.len(),
        warning_count = warnings.len(),
        "Normalized rule set"
    );

    RuleSetReview {
        rules: normalized,
        warnings,
    }
}

/// Runs the advisory consistency checks over every pair of rules.
///
/// Rules are compared by their limits as stored, so the set should already
/// be normalized. Two findings are reported:
///
/// - [`RuleWarningKind::MonotonicityViolation`]: one rule's dimensions
///   dominate another's but it allows less weight
/// - [`RuleWarningKind::MismatchedDimensions`]: neither rule's dimensions
///   contain the other's
pub fn review_rules(rules: &RuleSet) -> Vec<RuleWarning> {
    let rules = rules.rules();
    let mut warnings = Vec::new();

    for (i, first) in rules.iter().enumerate() {
        for (offset, second) in rules[i + 1..].iter().enumerate() {
            let j = i + 1 + offset;
            let order = compare_dimensions(first.dimension_limits(), second.dimension_limits());

            match order {
                DimensionOrder::Equal => {}
                DimensionOrder::Dominates if first.weight_limit < second.weight_limit => {
                    warnings.push(monotonicity_warning(i, first, j, second));
                }
                DimensionOrder::DominatedBy if second.weight_limit < first.weight_limit => {
                    warnings.push(monotonicity_warning(j, second, i, first));
                }
                DimensionOrder::Dominates | DimensionOrder::DominatedBy => {}
                DimensionOrder::Incomparable => {
                    warnings.push(RuleWarning {
                        kind: RuleWarningKind::MismatchedDimensions,
                        code: RuleWarningKind::MismatchedDimensions.code().to_string(),
                        first_index: i,
                        second_index: j,
                        message: format!(
                            "Mismatched dimensions: rule {} ({}) and rule {} ({}) are each larger on some axis",
                            i, first, j, second
                        ),
                    });
                }
            }
        }
    }

    warnings
}

/// Builds a warning for a `larger` rule that allows less weight than the
/// `smaller` one.
fn monotonicity_warning(
    larger_index: usize,
    larger: &RateRule,
    smaller_index: usize,
    smaller: &RateRule,
) -> RuleWarning {
    RuleWarning {
        kind: RuleWarningKind::MonotonicityViolation,
        code: RuleWarningKind::MonotonicityViolation.code().to_string(),
        first_index: larger_index.min(smaller_index),
        second_index: larger_index.max(smaller_index),
        message: format!(
            "Rule {} ({}) has larger dimensions than rule {} ({}) but a lower weight limit ({} g < {} g)",
            larger_index,
            larger,
            smaller_index,
            smaller,
            larger.weight_limit,
            smaller.weight_limit
        ),
    }
}
