//! State management module
//!
//! This module contains the match registry and the record-level
//! lifecycle logic that mutates the persisted timer fields.

pub mod app_state;
pub mod match_state;

// Re-export main types
pub use app_state::{AppState, StateError};
pub use match_state::{
    ClockSnapshot, EventKind, MatchEvent, MatchRecord, TeamSide, TransitionError,
};
