//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    clock::MatchStatus,
    state::{AppState, StateError},
};
use super::responses::{
    CreateMatchRequest, HealthResponse, MatchListResponse, MatchResponse, MatchView,
    RecordEventRequest, StatusResponse,
};

/// Map a state error to the response code clients see
fn error_status(err: &StateError) -> StatusCode {
    match err {
        StateError::MatchNotFound(_) => StatusCode::NOT_FOUND,
        StateError::Transition(_) => StatusCode::CONFLICT,
        StateError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle POST /matches - Register a new fixture
pub async fn create_match_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateMatchRequest>,
) -> Result<Json<MatchResponse>, StatusCode> {
    match state.create_match(request.home_team, request.away_team, request.duration_minutes) {
        Ok(record) => {
            let view = MatchView::from_record(record, Utc::now());
            Ok(Json(MatchResponse::ok("Match created".to_string(), view)))
        }
        Err(e) => {
            error!("Failed to create match: {}", e);
            Err(error_status(&e))
        }
    }
}

/// Handle POST /matches/:id/kick-off - Start the match clock
pub async fn kick_off_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchResponse>, StatusCode> {
    match state.kick_off(id) {
        Ok(record) => {
            info!("Kick-off endpoint called for match {}", id);
            let view = MatchView::from_record(record, Utc::now());
            Ok(Json(MatchResponse::ok("Match kicked off".to_string(), view)))
        }
        Err(e) => {
            error!("Failed to kick off match {}: {}", id, e);
            Err(error_status(&e))
        }
    }
}

/// Handle POST /matches/:id/pause - Freeze the match clock
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchResponse>, StatusCode> {
    match state.pause_match(id) {
        Ok(record) => {
            info!("Pause endpoint called for match {}", id);
            let view = MatchView::from_record(record, Utc::now());
            Ok(Json(MatchResponse::ok("Match paused".to_string(), view)))
        }
        Err(e) => {
            error!("Failed to pause match {}: {}", id, e);
            Err(error_status(&e))
        }
    }
}

/// Handle POST /matches/:id/resume - Restart a frozen clock
pub async fn resume_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchResponse>, StatusCode> {
    match state.resume_match(id) {
        Ok(record) => {
            info!("Resume endpoint called for match {}", id);
            let view = MatchView::from_record(record, Utc::now());
            Ok(Json(MatchResponse::ok("Match resumed".to_string(), view)))
        }
        Err(e) => {
            error!("Failed to resume match {}: {}", id, e);
            Err(error_status(&e))
        }
    }
}

/// Handle POST /matches/:id/full-time - End the match
pub async fn full_time_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchResponse>, StatusCode> {
    match state.finish_match(id) {
        Ok(record) => {
            info!("Full-time endpoint called for match {}", id);
            let view = MatchView::from_record(record, Utc::now());
            Ok(Json(MatchResponse::ok("Match finished".to_string(), view)))
        }
        Err(e) => {
            error!("Failed to finish match {}: {}", id, e);
            Err(error_status(&e))
        }
    }
}

/// Handle POST /matches/:id/events - Record a goal, card or substitution
pub async fn record_event_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordEventRequest>,
) -> Result<Json<MatchResponse>, StatusCode> {
    match state.record_event(id, request.kind, request.team, request.player) {
        Ok((record, event)) => {
            let message = format!("Recorded {:?} at {}", event.kind, event.minute_label);
            let view = MatchView::from_record(record, Utc::now());
            Ok(Json(MatchResponse::ok(message, view)))
        }
        Err(e) => {
            error!("Failed to record event for match {}: {}", id, e);
            Err(error_status(&e))
        }
    }
}

/// Handle GET /matches/:id - Fetch one match with its derived clock
pub async fn get_match_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchView>, StatusCode> {
    match state.get_match(id) {
        Ok(record) => Ok(Json(MatchView::from_record(record, Utc::now()))),
        Err(e) => {
            error!("Failed to get match {}: {}", id, e);
            Err(error_status(&e))
        }
    }
}

/// Handle GET /matches - List all matches
pub async fn list_matches_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MatchListResponse>, StatusCode> {
    match state.list_matches() {
        Ok(records) => {
            let now = Utc::now();
            let matches: Vec<MatchView> = records
                .into_iter()
                .map(|record| MatchView::from_record(record, now))
                .collect();
            let total = matches.len();
            Ok(Json(MatchListResponse { matches, total }))
        }
        Err(e) => {
            error!("Failed to list matches: {}", e);
            Err(error_status(&e))
        }
    }
}

/// Handle GET /status - Return current server status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let records = match state.list_matches() {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to read match registry: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let matches_live = records
        .iter()
        .filter(|record| record.timer.status == MatchStatus::InProgress)
        .count();
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        matches_total: records.len(),
        matches_live,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
