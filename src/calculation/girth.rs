//! Girth check functionality.
//!
//! Girth is length + 2 x width + 2 x height, computed on the package axes as
//! declared (before normalization), in millimeters.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Package};

/// Largest accepted girth in millimeters (300 cm). The bound is inclusive.
pub const GIRTH_LIMIT_MM: u64 = 3000;

/// The result of a successful girth check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GirthCheck {
    /// The computed girth in millimeters.
    pub girth_mm: u64,
    /// The audit step recording this check.
    pub audit_step: AuditStep,
}

/// Computes the girth of a package in millimeters.
///
/// # Example
///
/// ```
/// use parcel_rate_engine::calculation::calculate_girth;
/// use parcel_rate_engine::models::Package;
///
/// let package = Package::new(1200, 600, 600, 31000).unwrap();
/// assert_eq!(calculate_girth(&package), 3600);
/// ```
pub fn calculate_girth(package: &Package) -> u64 {
    u64::from(package.length()) + 2 * u64::from(package.width()) + 2 * u64::from(package.height())
}

/// Returns the package girth, or [`EngineError::GirthExceeded`] if it is
/// above [`GIRTH_LIMIT_MM`].
pub fn check_girth_limit(package: &Package) -> EngineResult<u64> {
    let girth_mm = calculate_girth(package);

    if girth_mm > GIRTH_LIMIT_MM {
        return Err(EngineError::GirthExceeded {
            girth_mm,
            limit_mm: GIRTH_LIMIT_MM,
        });
    }

    Ok(girth_mm)
}

/// Checks a package against [`GIRTH_LIMIT_MM`] and records an audit step.
///
/// # Returns
///
/// A [`GirthCheck`] with the girth and an audit step, or
/// [`EngineError::GirthExceeded`] if the girth is above the limit.
pub fn check_girth(package: &Package, step_number: u32) -> EngineResult<GirthCheck> {
    let girth_mm = check_girth_limit(package)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "girth_check".to_string(),
        rule_name: "Girth Check".to_string(),
        input: serde_json::json!({
            "length": package.length(),
            "width": package.width(),
            "height": package.height(),
            "limit_mm": GIRTH_LIMIT_MM
        }),
        output: serde_json::json!({
            "girth_mm": girth_mm
        }),
        reasoning: format!(
            "Girth {} + 2x{} + 2x{} = {} mm is within the {} mm limit",
            package.length(),
            package.width(),
            package.height(),
            girth_mm,
            GIRTH_LIMIT_MM
        ),
    };

    Ok(GirthCheck {
        girth_mm,
        audit_step,
    })
}
