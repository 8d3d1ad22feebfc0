//! Request types for the parcel rate engine API.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Package, RateRule};

/// Request body for the `/quote` endpoint.
///
/// Fields are signed so that zero and negative values reach validation
/// and are reported as invalid packages rather than as malformed JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Length in millimeters.
    pub length: i64,
    /// Width in millimeters.
    pub width: i64,
    /// Height in millimeters.
    pub height: i64,
    /// Weight in grams.
    pub weight: i64,
}

impl QuoteRequest {
    /// Validates the request into a [`Package`].
    pub fn to_package(&self) -> EngineResult<Package> {
        Package::new(self.length, self.width, self.height, self.weight)
    }
}

/// Request body carrying a whole rule set (`PUT /rules`, `POST /rules/review`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetRequest {
    /// The rules, in the order given.
    pub rules: Vec<RateRule>,
}

/// Request body carrying a single rule (`POST /rules`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRequest {
    /// The rule to add.
    pub rule: RateRule,
}
