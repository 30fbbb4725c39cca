//! HTTP API module for the Break Placement Engine.
//!
//! This module provides the REST API endpoints for placing breaks within a
//! shift and for inspecting the loaded ruleset.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PlacementRequest, ShiftRequest};
pub use response::{ApiError, ApiErrorResponse, PlacementResponse, RulesetResponse};
pub use state::AppState;
