//! HTTP request handlers for the parcel rate engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{normalize_and_order, resolve};
use crate::error::EngineError;
use crate::models::{AuditTrace, QuoteResult, RuleSet};

use super::request::{QuoteRequest, RuleRequest, RuleSetRequest};
use super::response::{ApiError, ApiErrorResponse, RuleSetResponse};
use super::state::AppState;

/// Version reported in every quote.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quote", post(quote_handler))
        .route(
            "/rules",
            get(list_rules_handler)
                .put(replace_rules_handler)
                .post(add_rule_handler),
        )
        .route(
            "/rules/:index",
            put(replace_rule_handler).delete(delete_rule_handler),
        )
        .route("/rules/review", post(review_rules_handler))
        .route("/rules/reload", post(reload_rules_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, error: EngineError, context: &str) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "{}",
        context
    );
    ApiErrorResponse::from(error).into_response()
}

/// Maps a JSON body rejection to an API error.
///
/// Missing fields are validation errors; anything else wrong with the body
/// is malformed JSON.
fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response()
}

/// Handler for POST /quote.
///
/// Validates the package and resolves its price against the active rules.
async fn quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let package = match request.to_package() {
        Ok(package) => package,
        Err(err) => return engine_error_response(correlation_id, err, "Invalid package"),
    };

    let rules = state.rules();
    let start_time = Instant::now();
    match resolve(&package, &rules) {
        Ok(resolution) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                package = %package,
                rule_index = resolution.rule_index,
                price = %resolution.price,
                duration_us = duration.as_micros(),
                "Quote resolved"
            );

            let quote = QuoteResult {
                quote_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                engine_version: ENGINE_VERSION.to_string(),
                package,
                price: resolution.price,
                matched_rule_index: resolution.rule_index,
                matched_rule: resolution.rule,
                normalized_dimensions: resolution.normalized_dimensions,
                girth_mm: resolution.girth_mm,
                audit_trace: AuditTrace {
                    steps: resolution.audit_steps,
                    duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
                },
            };
            json_response(StatusCode::OK, quote)
        }
        Err(err) => engine_error_response(correlation_id, err, "Quote failed"),
    }
}

/// Handler for GET /rules.
async fn list_rules_handler(State(state): State<AppState>) -> Response {
    let rules = state.rules();
    json_response(
        StatusCode::OK,
        RuleSetResponse {
            rules: RuleSet::clone(&rules),
        },
    )
}

/// Handler for PUT /rules.
///
/// Replaces the whole rule set. The new set is normalized, persisted and
/// activated; the response carries the normalized rules and any warnings.
async fn replace_rules_handler(
    State(state): State<AppState>,
    payload: Result<Json<RuleSetRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let replacement = RuleSet::new(request.rules);
    let result = state
        .edit_rules(move |rules| {
            *rules = replacement;
            Ok(())
        })
        .await;

    match result {
        Ok(review) => {
            info!(
                correlation_id = %correlation_id,
                rule_count = review.rules.len(),
                warning_count = review.warnings.len(),
                "Rule set replaced"
            );
            json_response(StatusCode::OK, review)
        }
        Err(err) => engine_error_response(correlation_id, err, "Rule set replacement failed"),
    }
}

/// Handler for POST /rules.
async fn add_rule_handler(
    State(state): State<AppState>,
    payload: Result<Json<RuleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let rule = request.rule;
    info!(correlation_id = %correlation_id, rule = %rule, "Adding rule");

    let result = state
        .edit_rules(move |rules| {
            rules.push(rule);
            Ok(())
        })
        .await;

    match result {
        Ok(review) => json_response(StatusCode::CREATED, review),
        Err(err) => engine_error_response(correlation_id, err, "Adding rule failed"),
    }
}

fn index_rejection_response(correlation_id: Uuid, rejection: PathRejection) -> Response {
    warn!(correlation_id = %correlation_id, error = %rejection, "Invalid rule index");
    ApiErrorResponse::new(
        StatusCode::BAD_REQUEST,
        ApiError::validation_error(format!("Invalid rule index: {}", rejection)),
    )
    .into_response()
}

/// Handler for PUT /rules/:index.
///
/// Replaces one rule. The edited set is re-normalized, so the rule may end
/// up at a different index.
async fn replace_rule_handler(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
    payload: Result<Json<RuleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let index = match index {
        Ok(Path(index)) => index,
        Err(rejection) => return index_rejection_response(correlation_id, rejection),
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let rule = request.rule;
    let result = state
        .edit_rules(move |rules| rules.replace(index, rule).map(|_| ()))
        .await;

    match result {
        Ok(review) => {
            info!(correlation_id = %correlation_id, index, "Rule replaced");
            json_response(StatusCode::OK, review)
        }
        Err(err) => engine_error_response(correlation_id, err, "Replacing rule failed"),
    }
}

/// Handler for DELETE /rules/:index.
///
/// The index refers to the active rule set as returned by GET /rules.
async fn delete_rule_handler(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let index = match index {
        Ok(Path(index)) => index,
        Err(rejection) => return index_rejection_response(correlation_id, rejection),
    };

    let result = state
        .edit_rules(move |rules| rules.remove(index).map(|_| ()))
        .await;

    match result {
        Ok(review) => {
            info!(correlation_id = %correlation_id, index, "Rule removed");
            json_response(StatusCode::OK, review)
        }
        Err(err) => engine_error_response(correlation_id, err, "Removing rule failed"),
    }
}

/// Handler for POST /rules/review.
///
/// Normalizes and reviews the submitted rules without changing the active
/// set or the store.
async fn review_rules_handler(payload: Result<Json<RuleSetRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let review = normalize_and_order(&RuleSet::new(request.rules));
    info!(
        correlation_id = %correlation_id,
        warning_count = review.warnings.len(),
        "Rule set reviewed"
    );
    json_response(StatusCode::OK, review)
}

/// Handler for POST /rules/reload.
///
/// Re-reads the rule file. If it cannot be loaded the previous rules stay
/// active.
async fn reload_rules_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.reload_rules().await {
        Ok(Some(rules)) => json_response(
            StatusCode::OK,
            RuleSetResponse {
                rules: RuleSet::clone(&rules),
            },
        ),
        Ok(None) => {
            ApiErrorResponse::new(StatusCode::CONFLICT, ApiError::no_rule_store()).into_response()
        }
        Err(err) => engine_error_response(correlation_id, err, "Reload failed"),
    }
}
