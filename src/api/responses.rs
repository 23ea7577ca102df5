//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::{ClockSnapshot, EventKind, MatchEvent, MatchRecord, TeamSide};

/// Request body for POST /matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    pub home_team: String,
    pub away_team: String,
    /// Nominal match length in minutes; server default when omitted
    pub duration_minutes: Option<u32>,
}

/// Request body for POST /matches/:id/events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEventRequest {
    pub kind: EventKind,
    pub team: TeamSide,
    pub player: Option<String>,
}

/// A match as served to clients: the record plus its derived clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchView {
    pub id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub duration_minutes: u32,
    pub clock: ClockSnapshot,
    pub events: Vec<MatchEvent>,
    pub created_at: DateTime<Utc>,
}

impl MatchView {
    /// Build the client view of a record, deriving the clock at `now`
    pub fn from_record(record: MatchRecord, now: DateTime<Utc>) -> Self {
        let clock = record.clock_snapshot(now);
        Self {
            id: record.id,
            home_team: record.home_team,
            away_team: record.away_team,
            home_score: record.home_score,
            away_score: record.away_score,
            duration_minutes: record.duration_minutes,
            clock,
            events: record.events,
            created_at: record.created_at,
        }
    }
}

/// API response structure for match control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "match")]
    pub record: MatchView,
}

impl MatchResponse {
    /// Create a new match response
    pub fn new(status: String, message: String, record: MatchView) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            record,
        }
    }

    /// Create a success response
    pub fn ok(message: String, record: MatchView) -> Self {
        Self::new("ok".to_string(), message, record)
    }
}

/// Response for GET /matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchView>,
    pub total: usize,
}

/// Server status response with registry counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub matches_total: usize,
    pub matches_live: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
