//! Quote result models for the parcel rate engine.
//!
//! This module contains the [`QuoteResult`] type and the audit structures
//! that record how a price was resolved: the girth check, the normalization
//! of the package dimensions and the rule that matched.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{NormalizedDimensions, Package, RateRule};

/// A single step in the audit trace recording a resolution decision.
///
/// Each step captures the input, output, and reasoning for one stage of
/// the resolver.
///
/// # Example
///
/// ```
/// use parcel_rate_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "girth_check".to_string(),
///     rule_name: "Girth Check".to_string(),
///     input: serde_json::json!({"length": 300, "width": 300, "height": 150}),
///     output: serde_json::json!({"girth_mm": 1200}),
///     reasoning: "Girth 1200 mm is within the 3000 mm limit".to_string(),
/// };
/// assert_eq!(step.step_number, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the resolver stage.
    pub rule_id: String,
    /// The human-readable name of the stage.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of resolution steps.
    pub steps: Vec<AuditStep>,
    /// The total resolution duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of rating a package.
///
/// # Example
///
/// ```
/// use parcel_rate_engine::models::{
///     AuditTrace, NormalizedDimensions, Package, QuoteResult, RateRule,
/// };
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let rule = RateRule::new(150, 300, 300, 1000, Decimal::new(389, 2));
/// let quote = QuoteResult {
///     quote_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     package: Package::new(300, 300, 150, 1000).unwrap(),
///     price: rule.price,
///     matched_rule_index: 0,
///     matched_rule: rule,
///     normalized_dimensions: NormalizedDimensions { smallest: 150, middle: 300, largest: 300 },
///     girth_mm: 1200,
///     audit_trace: AuditTrace { steps: vec![], duration_us: 0 },
/// };
/// assert_eq!(quote.price, Decimal::new(389, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Unique identifier for this quote.
    pub quote_id: Uuid,
    /// When the quote was produced.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the quote.
    pub engine_version: String,
    /// The package that was rated.
    pub package: Package,
    /// The resolved price.
    pub price: Decimal,
    /// Position of the matching rule in the active rule set.
    pub matched_rule_index: usize,
    /// The matching rule.
    pub matched_rule: RateRule,
    /// The package dimensions sorted ascending.
    pub normalized_dimensions: NormalizedDimensions,
    /// The package girth in millimeters.
    pub girth_mm: u64,
    /// How the price was resolved.
    pub audit_trace: AuditTrace,
}
