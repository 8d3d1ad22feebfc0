//! Dimension normalization helpers.
//!
//! Sorting the three dimensions ascending makes matching independent of
//! which physical axis was labelled length, width or height. The same
//! transformation is applied to packages at resolution time and to rule
//! limits when an operator reviews a rule set.

use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, NormalizedDimensions, Package, RateRule};

/// The result of normalizing a package's dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionNormalization {
    /// The sorted dimensions.
    pub dimensions: NormalizedDimensions,
    /// The audit step recording the normalization.
    pub audit_step: AuditStep,
}

/// Sorts three values ascending.
///
/// # Example
///
/// ```
/// use parcel_rate_engine::calculation::sort_dimensions;
///
/// assert_eq!(sort_dimensions([600, 150, 300]), [150, 300, 600]);
/// ```
pub fn sort_dimensions(mut dimensions: [u32; 3]) -> [u32; 3] {
    dimensions.sort_unstable();
    dimensions
}

/// Returns the package's dimensions sorted ascending.
pub fn normalized_dimensions(package: &Package) -> NormalizedDimensions {
    let [smallest, middle, largest] = sort_dimensions(package.dimensions());
    NormalizedDimensions {
        smallest,
        middle,
        largest,
    }
}

/// Normalizes a package's dimensions and records an audit step.
pub fn normalize_package(package: &Package, step_number: u32) -> DimensionNormalization {
    let dimensions = normalized_dimensions(package);

    let audit_step = AuditStep {
        step_number,
        rule_id: "dimension_normalization".to_string(),
        rule_name: "Dimension Normalization".to_string(),
        input: serde_json::json!({
            "length": package.length(),
            "width": package.width(),
            "height": package.height()
        }),
        output: serde_json::json!({
            "d0": dimensions.smallest,
            "d1": dimensions.middle,
            "d2": dimensions.largest
        }),
        reasoning: format!(
            "Sorted dimensions {}x{}x{} ascending to {}x{}x{}",
            package.length(),
            package.width(),
            package.height(),
            dimensions.smallest,
            dimensions.middle,
            dimensions.largest
        ),
    };

    DimensionNormalization {
        dimensions,
        audit_step,
    }
}

/// Returns a copy of the rule with its three dimension limits sorted
/// ascending. Weight limit and price are unchanged.
pub fn normalize_rule(rule: &RateRule) -> RateRule {
    let [length_limit, width_limit, height_limit] = sort_dimensions(rule.dimension_limits());
    RateRule {
        length_limit,
        width_limit,
        height_limit,
        ..rule.clone()
    }
}
