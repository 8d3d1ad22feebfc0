//! HTTP API module for the parcel rate engine.
//!
//! This module provides the REST endpoints for quoting packages and for
//! viewing, editing, reviewing and reloading the active rate rules.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{ENGINE_VERSION, create_router};
pub use request::{QuoteRequest, RuleRequest, RuleSetRequest};
pub use response::{ApiError, ApiErrorResponse, RuleSetResponse};
pub use state::AppState;
