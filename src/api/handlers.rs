//! HTTP request handlers for the Break Placement Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::place_breaks;
use crate::models::ShiftWindow;

use super::request::PlacementRequest;
use super::response::{ApiError, ApiErrorResponse, PlacementResponse, RulesetResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/placements", post(placements_handler))
        .route("/rules", get(rules_handler))
        .with_state(state)
}

/// Handler for POST /placements endpoint.
///
/// Accepts a shift (and optionally inline rules) and returns the placed
/// breaks. Placement failures are returned with status 200.
async fn placements_handler(
    State(state): State<AppState>,
    payload: Result<Json<PlacementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing placement request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
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
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let shift: ShiftWindow = request.shift.into();
    if let Err(err) = shift.validate() {
        warn!(
            correlation_id = %correlation_id,
            shift_id = %shift.id,
            error = %err,
            "Invalid shift"
        );
        let api_error: ApiErrorResponse = err.into();
        return json_response(api_error.status, api_error.error);
    }

    let start_time = Instant::now();
    let result = match &request.rules {
        Some(rules) => place_breaks(&shift, rules),
        None => state.planner().plan(&shift),
    };
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        shift_id = %shift.id,
        inline_rules = request.rules.is_some(),
        breaks = result.breaks.len(),
        failure = result.failure.map(|f| f.code()).unwrap_or_default(),
        duration_us,
        "Placement completed"
    );

    json_response(StatusCode::OK, PlacementResponse::new(result, duration_us))
}

/// Handler for GET /rules endpoint.
///
/// Returns the loaded ruleset metadata and rules in selection order.
async fn rules_handler(State(state): State<AppState>) -> Response {
    let ruleset = state.ruleset();
    info!(
        ruleset = %ruleset.metadata().code,
        rules = ruleset.rules().len(),
        "Listing break rules"
    );
    json_response(StatusCode::OK, RulesetResponse::from(ruleset))
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
