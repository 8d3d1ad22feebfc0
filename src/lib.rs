//! Parcel rate engine
//!
//! This crate prices parcels against a configurable table of rate rules.
//! A package is checked against the girth limit, its dimensions are sorted,
//! and the first rule whose limits cover it sets the price. Rule sets are
//! loaded from and persisted to a key-value file, normalized and reviewed
//! before they take effect, and served over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
