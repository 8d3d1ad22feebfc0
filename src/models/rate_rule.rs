//! Rate rule model.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single tariff tier: inclusive dimension and weight limits plus a price.
///
/// Limits are millimeters and grams. The price is not validated; zero and
/// negative prices are returned as configured.
///
/// # Example
///
/// ```
/// use parcel_rate_engine::models::RateRule;
/// use rust_decimal::Decimal;
///
/// let rule = RateRule::new(300, 300, 150, 1000, Decimal::new(389, 2));
/// assert_eq!(rule.to_string(), "300x300x150x1000 @ 3.89");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRule {
    /// Upper bound for the first dimension.
    pub length_limit: u32,
    /// Upper bound for the second dimension.
    pub width_limit: u32,
    /// Upper bound for the third dimension.
    pub height_limit: u32,
    /// Upper bound for the weight.
    pub weight_limit: u32,
    /// The price charged when this rule matches.
    pub price: Decimal,
}

impl RateRule {
    /// Creates a new rule.
    pub fn new(
        length_limit: u32,
        width_limit: u32,
        height_limit: u32,
        weight_limit: u32,
        price: Decimal,
    ) -> Self {
        Self {
            length_limit,
            width_limit,
            height_limit,
            weight_limit,
            price,
        }
    }

    /// The three dimension limits in stored order.
    pub fn dimension_limits(&self) -> [u32; 3] {
        [self.length_limit, self.width_limit, self.height_limit]
    }

    /// The key rules are ordered by after normalization.
    pub fn sort_key(&self) -> (u32, u32, u32, u32) {
        (
            self.length_limit,
            self.width_limit,
            self.height_limit,
            self.weight_limit,
        )
    }
}

impl fmt::Display for RateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{}x{} @ {}",
            self.length_limit, self.width_limit, self.height_limit, self.weight_limit, self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_dimension_limits_keep_stored_order() {
        let rule = RateRule::new(600, 300, 150, 2000, dec("4.39"));
        assert_eq!(rule.dimension_limits(), [600, 300, 150]);
        assert_eq!(rule.sort_key(), (600, 300, 150, 2000));
    }

    #[test]
    fn test_deserialize_rule_with_string_price() {
        let json = r#"{
            "length_limit": 1200,
            "width_limit": 600,
            "height_limit": 600,
            "weight_limit": 31000,
            "price": "14.99"
        }"#;

        let rule: RateRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule, RateRule::new(1200, 600, 600, 31000, dec("14.99")));
    }

    #[test]
    fn test_price_serializes_as_string() {
        let rule = RateRule::new(1, 2, 3, 4, dec("0.50"));
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["price"], "0.50");
    }

    #[test]
    fn test_negative_price_is_representable() {
        let rule = RateRule::new(10, 10, 10, 10, dec("-1.00"));
        assert!(rule.price.is_sign_negative());
    }
}
