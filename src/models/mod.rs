//! Core data models for the parcel rate engine.
//!
//! This module contains all the domain models used throughout the engine.

mod package;
mod quote_result;
mod rate_rule;
mod rule_review;
mod rule_set;

pub use package::{NormalizedDimensions, Package};
pub use quote_result::{AuditStep, AuditTrace, QuoteResult};
pub use rate_rule::RateRule;
pub use rule_review::{RuleSetReview, RuleWarning, RuleWarningKind};
pub use rule_set::RuleSet;
