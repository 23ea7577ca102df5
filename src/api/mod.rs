//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/matches", post(create_match_handler).get(list_matches_handler))
        .route("/matches/:id", get(get_match_handler))
        .route("/matches/:id/kick-off", post(kick_off_handler))
        .route("/matches/:id/pause", post(pause_handler))
        .route("/matches/:id/resume", post(resume_handler))
        .route("/matches/:id/full-time", post(full_time_handler))
        .route("/matches/:id/events", post(record_event_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
