//! Error types for the parcel rate engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the resolver and the rule store can report.

use thiserror::Error;

/// The main error type for the parcel rate engine.
///
/// Every operation in the engine returns this error type. Nothing is retried
/// or swallowed internally; the caller decides how to react.
///
/// # Example
///
/// ```
/// use parcel_rate_engine::error::EngineError;
///
/// let error = EngineError::GirthExceeded {
///     girth_mm: 3600,
///     limit_mm: 3000,
/// };
/// assert_eq!(error.to_string(), "Girth 3600 mm exceeds the limit of 3000 mm");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A package measurement was zero, negative or out of range.
    #[error("Invalid package field '{field}': {message}")]
    InvalidPackage {
        /// The offending field (`length`, `width`, `height` or `weight`).
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The package girth is above the carrier limit.
    #[error("Girth {girth_mm} mm exceeds the limit of {limit_mm} mm")]
    GirthExceeded {
        /// The computed girth in millimeters.
        girth_mm: u64,
        /// The limit in millimeters.
        limit_mm: u64,
    },

    /// No rule in the active rule set covers the package.
    #[error("No rate rule covers package {package}")]
    NoMatchingRule {
        /// The package, formatted as `LxWxH mm, W g`.
        package: String,
    },

    /// A rule configuration entry could not be parsed.
    #[error("Malformed rule configuration at '{key}': {message}")]
    ConfigFormat {
        /// The configuration key that failed.
        key: String,
        /// A description of the problem.
        message: String,
    },

    /// Reading or writing the rule configuration failed.
    #[error("Rule configuration I/O failed for '{location}': {message}")]
    ConfigIo {
        /// The file path or stream description.
        location: String,
        /// The underlying I/O error message.
        message: String,
    },

    /// A rule edit addressed a position outside the rule set.
    #[error("Rule index {index} is out of range for a rule set of {len} rules")]
    RuleIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The current number of rules.
        len: usize,
    },

    /// The service settings file could not be read or parsed.
    #[error("Failed to load settings file '{path}': {message}")]
    SettingsError {
        /// The path to the settings file.
        path: String,
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
