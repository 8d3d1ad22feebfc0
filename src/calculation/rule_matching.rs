//! First-fit rate resolution.
//!
//! The resolver validates the package girth, sorts the package dimensions
//! ascending and returns the price of the first rule, in stored order, whose
//! limits the package satisfies. Rule limits are read positionally and are
//! never re-sorted here; ordering and normalizing rules is the job of
//! [`normalize_and_order`](super::normalize_and_order), run by whatever edits
//! the rule set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, NormalizedDimensions, Package, RateRule, RuleSet};

use super::girth::{check_girth, check_girth_limit};
use super::normalization::{normalize_package, normalized_dimensions};

/// The full outcome of resolving a package against a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateResolution {
    /// The price of the matching rule.
    pub price: Decimal,
    /// Position of the matching rule in the rule set.
    pub rule_index: usize,
    /// The matching rule.
    pub rule: RateRule,
    /// The package dimensions sorted ascending.
    pub normalized_dimensions: NormalizedDimensions,
    /// The package girth in millimeters.
    pub girth_mm: u64,
    /// Audit steps in the order they were taken.
    pub audit_steps: Vec<AuditStep>,
}

/// Returns true if `rule` covers a package with the given normalized
/// dimensions and weight. All bounds are inclusive.
pub fn rule_covers(rule: &RateRule, dimensions: &NormalizedDimensions, weight: u32) -> bool {
    dimensions.smallest <= rule.length_limit
        && dimensions.middle <= rule.width_limit
        && dimensions.largest <= rule.height_limit
        && weight <= rule.weight_limit
}

/// Finds the first rule, in stored order, covering the given dimensions and
/// weight.
pub fn find_first_match<'a>(
    dimensions: &NormalizedDimensions,
    weight: u32,
    rules: &'a RuleSet,
) -> Option<(usize, &'a RateRule)> {
    rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule_covers(rule, dimensions, weight))
}

/// Resolves the price for a package.
///
/// # Errors
///
/// - [`EngineError::GirthExceeded`] if the girth is above 3000 mm
/// - [`EngineError::NoMatchingRule`] if no rule covers the package
///
/// # Example
///
/// ```
/// use parcel_rate_engine::calculation::{normalize_and_order, resolve_price};
/// use parcel_rate_engine::models::{Package, RuleSet};
/// use rust_decimal::Decimal;
///
/// let rules = normalize_and_order(&RuleSet::standard_tariff()).rules;
/// let package = Package::new(300, 300, 150, 1000).unwrap();
///
/// assert_eq!(resolve_price(&package, &rules).unwrap(), Decimal::new(389, 2));
/// ```
pub fn resolve_price(package: &Package, rules: &RuleSet) -> EngineResult<Decimal> {
    check_girth_limit(package)?;

    let dimensions = normalized_dimensions(package);
    find_first_match(&dimensions, package.weight(), rules)
        .map(|(_, rule)| rule.price)
        .ok_or_else(|| no_matching_rule(package))
}

/// Resolves the price for raw measurements.
///
/// This is the boundary entry point: the four values are validated as a
/// [`Package`] first, so non-positive input fails with
/// [`EngineError::InvalidPackage`].
pub fn resolve_price_for(
    length: i64,
    width: i64,
    height: i64,
    weight: i64,
    rules: &RuleSet,
) -> EngineResult<Decimal> {
    let package = Package::new(length, width, height, weight)?;
    resolve_price(&package, rules)
}

/// Resolves a package and records every step taken.
///
/// Produces the same price as [`resolve_price`], together with the matched
/// rule, the normalized dimensions, the girth and an audit trail.
pub fn resolve(package: &Package, rules: &RuleSet) -> EngineResult<RateResolution> {
    let mut audit_steps = Vec::with_capacity(3);
    let mut step_number: u32 = 1;

    let girth = check_girth(package, step_number)?;
    audit_steps.push(girth.audit_step);
    step_number += 1;

    let normalization = normalize_package(package, step_number);
    let dimensions = normalization.dimensions;
    audit_steps.push(normalization.audit_step);
    step_number += 1;

    let Some((rule_index, rule)) = find_first_match(&dimensions, package.weight(), rules) else {
        debug!(
            package = %package,
            rule_count = rules.len(),
            "No rate rule covers package"
        );
        return Err(no_matching_rule(package));
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "rule_match".to_string(),
        rule_name: "First-Fit Rule Match".to_string(),
        input: serde_json::json!({
            "d0": dimensions.smallest,
            "d1": dimensions.middle,
            "d2": dimensions.largest,
            "weight": package.weight(),
            "rule_count": rules.len()
        }),
        output: serde_json::json!({
            "rule_index": rule_index,
            "rule": rule.to_string(),
            "price": rule.price.to_string()
        }),
        reasoning: format!(
            "Rule {} ({}) is the first rule covering {}x{}x{} mm at {} g",
            rule_index,
            rule,
            dimensions.smallest,
            dimensions.middle,
            dimensions.largest,
            package.weight()
        ),
    });

    debug!(
        package = %package,
        rule_index,
        price = %rule.price,
        "Resolved rate rule"
    );

    Ok(RateResolution {
        price: rule.price,
        rule_index,
        rule: rule.clone(),
        normalized_dimensions: dimensions,
        girth_mm: girth.girth_mm,
        audit_steps,
    })
}

fn no_matching_rule(package: &Package) -> EngineError {
    EngineError::NoMatchingRule {
        package: package.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{GIRTH_LIMIT_MM, normalize_and_order};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn standard_rules() -> RuleSet {
        normalize_and_order(&RuleSet::standard_tariff()).rules
    }

    fn package(l: i64, w: i64, h: i64, wt: i64) -> Package {
        Package::new(l, w, h, wt).unwrap()
    }

    // ==========================================================================
    // Default tariff scenarios
    // ==========================================================================
    #[test]
    fn test_small_packet_first_tier() {
        let result = resolve_price(&package(300, 300, 150, 1000), &standard_rules());
        assert_eq!(result.unwrap(), dec("3.89"));
    }

    #[test]
    fn test_medium_packet_second_tier() {
        let result = resolve_price(&package(600, 300, 150, 2000), &standard_rules());
        assert_eq!(result.unwrap(), dec("4.39"));
    }

    #[test]
    fn test_parcel_tiers_by_weight() {
        let rules = standard_rules();
        assert_eq!(
            resolve_price(&package(1000, 400, 400, 5000), &rules).unwrap(),
            dec("5.89")
        );
        assert_eq!(
            resolve_price(&package(1000, 400, 400, 10000), &rules).unwrap(),
            dec("7.99")
        );
        assert_eq!(
            resolve_price(&package(1000, 400, 400, 31000), &rules).unwrap(),
            dec("14.99")
        );
    }

    #[test]
    fn test_girth_exceeded_even_within_tier_limits() {
        let result = resolve_price(&package(1200, 600, 600, 31000), &standard_rules());
        assert_eq!(
            result,
            Err(EngineError::GirthExceeded {
                girth_mm: 3600,
                limit_mm: 3000,
            })
        );
    }

    #[test]
    fn test_overweight_package_has_no_rule() {
        let result = resolve_price(&package(1000, 400, 400, 32000), &standard_rules());
        assert!(matches!(result, Err(EngineError::NoMatchingRule { .. })));
    }

    #[test]
    fn test_empty_rule_set_never_matches() {
        let result = resolve_price(&package(1, 1, 1, 1), &RuleSet::empty());
        assert_eq!(
            result,
            Err(EngineError::NoMatchingRule {
                package: "1x1x1 mm, 1 g".to_string(),
            })
        );
    }

    // ==========================================================================
    // Matching semantics
    // ==========================================================================
    #[test]
    fn test_axis_order_of_package_does_not_matter() {
        let rules = standard_rules();
        let a = resolve_price(&package(150, 300, 300, 1000), &rules).unwrap();
        let b = resolve_price(&package(300, 150, 300, 1000), &rules).unwrap();
        let c = resolve_price(&package(300, 300, 150, 1000), &rules).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let rules = RuleSet::new(vec![RateRule::new(10, 20, 30, 40, dec("1.00"))]);
        assert_eq!(
            resolve_price(&package(10, 20, 30, 40), &rules).unwrap(),
            dec("1.00")
        );
        assert!(resolve_price(&package(10, 20, 31, 40), &rules).is_err());
        assert!(resolve_price(&package(10, 20, 30, 41), &rules).is_err());
    }

    #[test]
    fn test_first_fit_prefers_earlier_overlapping_rule() {
        let rules = RuleSet::new(vec![
            RateRule::new(100, 100, 100, 1000, dec("9.00")),
            RateRule::new(10, 10, 10, 100, dec("1.00")),
        ]);
        assert_eq!(
            resolve_price(&package(5, 5, 5, 50), &rules).unwrap(),
            dec("9.00")
        );
    }

    #[test]
    fn test_rule_limits_are_not_resorted() {
        // Un-normalized limits: d2 of the package (300) is compared to the
        // third limit (150) of the first two tiers, so the third tier wins.
        let rules = RuleSet::standard_tariff();
        let result = resolve_price(&package(300, 300, 150, 1000), &rules);
        assert_eq!(result.unwrap(), dec("5.89"));
    }

    #[test]
    fn test_zero_and_negative_prices_returned_verbatim() {
        let free = RuleSet::new(vec![RateRule::new(10, 10, 10, 10, Decimal::ZERO)]);
        assert_eq!(resolve_price(&package(1, 1, 1, 1), &free).unwrap(), Decimal::ZERO);

        let credit = RuleSet::new(vec![RateRule::new(10, 10, 10, 10, dec("-2.50"))]);
        assert_eq!(
            resolve_price(&package(1, 1, 1, 1), &credit).unwrap(),
            dec("-2.50")
        );
    }

    #[test]
    fn test_resolve_price_for_validates_input() {
        let rules = standard_rules();
        let result = resolve_price_for(0, 100, 100, 5000, &rules);
        assert!(matches!(
            result,
            Err(EngineError::InvalidPackage { ref field, .. }) if field == "length"
        ));

        assert_eq!(
            resolve_price_for(600, 300, 150, 2000, &rules).unwrap(),
            dec("4.39")
        );
    }

    // ==========================================================================
    // Audited resolution
    // ==========================================================================
    #[test]
    fn test_resolve_records_steps_in_order() {
        let result = resolve(&package(600, 300, 150, 2000), &standard_rules()).unwrap();

        assert_eq!(result.price, dec("4.39"));
        assert_eq!(result.rule_index, 1);
        assert_eq!(result.girth_mm, 1500);
        assert_eq!(result.normalized_dimensions.as_array(), [150, 300, 600]);

        let ids: Vec<&str> = result
            .audit_steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(ids, vec!["girth_check", "dimension_normalization", "rule_match"]);

        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        assert_eq!(result.audit_steps[2].output["rule_index"], 1);
        assert_eq!(result.audit_steps[2].output["price"], "4.39");
    }

    #[test]
    fn test_resolve_and_resolve_price_agree_on_errors() {
        let rules = standard_rules();
        let big = package(1200, 600, 600, 31000);
        assert_eq!(
            resolve(&big, &rules).unwrap_err(),
            resolve_price(&big, &rules).unwrap_err()
        );

        let heavy = package(100, 100, 100, 40000);
        assert_eq!(
            resolve(&heavy, &rules).unwrap_err(),
            resolve_price(&heavy, &rules).unwrap_err()
        );
    }

    // ==========================================================================
    // Properties
    // ==========================================================================
    fn bounded_package() -> impl Strategy<Value = Package> {
        (1i64..=1300, 1i64..=700, 1i64..=700, 1i64..=32000)
            .prop_map(|(l, w, h, wt)| Package::new(l, w, h, wt).unwrap())
    }

    proptest! {
        /// A resolved price always belongs to a rule that covers the package.
        #[test]
        fn resolved_price_comes_from_covering_rule(p in bounded_package()) {
            let rules = standard_rules();
            match resolve(&p, &rules) {
                Ok(resolution) => {
                    let rule = &rules.rules()[resolution.rule_index];
                    prop_assert_eq!(rule.price, resolution.price);
                    prop_assert!(rule_covers(rule, &resolution.normalized_dimensions, p.weight()));
                    prop_assert!(resolution.girth_mm <= GIRTH_LIMIT_MM);
                }
                Err(EngineError::GirthExceeded { girth_mm, .. }) => {
                    prop_assert!(girth_mm > GIRTH_LIMIT_MM);
                }
                Err(EngineError::NoMatchingRule { .. }) => {
                    let dims = normalized_dimensions(&p);
                    prop_assert!(rules.iter().all(|r| !rule_covers(r, &dims, p.weight())));
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }

        /// Heavier packages never get a cheaper price from the standard tariff.
        #[test]
        fn price_is_monotonic_in_weight(p in bounded_package(), extra in 0u32..5000) {
            let rules = standard_rules();
            let heavier = Package::new(
                i64::from(p.length()),
                i64::from(p.width()),
                i64::from(p.height()),
                i64::from(p.weight()) + i64::from(extra),
            ).unwrap();

            if let (Ok(light), Ok(heavy)) = (resolve_price(&p, &rules), resolve_price(&heavier, &rules)) {
                prop_assert!(heavy >= light);
            }
        }

        /// The fast path and the audited path reject the same packages for girth.
        #[test]
        fn girth_rejection_matches_audited_resolve(p in bounded_package()) {
            let rules = standard_rules();
            let fast = resolve_price(&p, &rules);
            let audited = resolve(&p, &rules);
            match (fast, audited) {
                (Err(a @ EngineError::GirthExceeded { .. }), Err(b)) => prop_assert_eq!(a, b),
                (Err(EngineError::GirthExceeded { .. }), Ok(_)) => {
                    prop_assert!(false, "only the fast path rejected {}", p)
                }
                (_, Err(EngineError::GirthExceeded { .. })) => {
                    prop_assert!(false, "only the audited path rejected {}", p)
                }
                _ => {}
            }
        }

        /// Larger packages never get a cheaper price from the standard tariff.
        #[test]
        fn price_is_monotonic_in_length(p in bounded_package(), extra in 0u32..500) {
            let rules = standard_rules();
            let longer = Package::new(
                i64::from(p.length()) + i64::from(extra),
                i64::from(p.width()),
                i64::from(p.height()),
                i64::from(p.weight()),
            ).unwrap();

            if let (Ok(short), Ok(long)) = (resolve_price(&p, &rules), resolve_price(&longer, &rules)) {
                prop_assert!(long >= short);
            }
        }

        /// Wider packages never get a cheaper price from the standard tariff.
        #[test]
        fn price_is_monotonic_in_width(p in bounded_package(), extra in 0u32..500) {
            let rules = standard_rules();
            let wider = Package::new(
                i64::from(p.length()),
                i64::from(p.width()) + i64::from(extra),
                i64::from(p.height()),
                i64::from(p.weight()),
            ).unwrap();

            if let (Ok(narrow), Ok(wide)) = (resolve_price(&p, &rules), resolve_price(&wider, &rules)) {
                prop_assert!(wide >= narrow);
            }
        }

        /// Taller packages never get a cheaper price from the standard tariff.
        #[test]
        fn price_is_monotonic_in_height(p in bounded_package(), extra in 0u32..500) {
            let rules = standard_rules();
            let taller = Package::new(
                i64::from(p.length()),
                i64::from(p.width()),
                i64::from(p.height()) + i64::from(extra),
                i64::from(p.weight()),
            ).unwrap();

            if let (Ok(low), Ok(tall)) = (resolve_price(&p, &rules), resolve_price(&taller, &rules)) {
                prop_assert!(tall >= low);
            }
        }
    }
}
