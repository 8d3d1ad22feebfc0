//! Calculation logic for the parcel rate engine.
//!
//! This module contains the girth check, dimension normalization, first-fit
//! rule matching used to price a package, and the normalization and
//! advisory review applied to rule sets before they take effect.

mod girth;
mod normalization;
mod rule_matching;
mod rule_review;

pub use girth::{GIRTH_LIMIT_MM, GirthCheck, calculate_girth, check_girth, check_girth_limit};
pub use normalization::{
    DimensionNormalization, normalize_package, normalize_rule, normalized_dimensions,
    sort_dimensions,
};
pub use rule_matching::{
    RateResolution, find_first_match, resolve, resolve_price, resolve_price_for, rule_covers,
};
pub use rule_review::{normalize_and_order, review_rules};
