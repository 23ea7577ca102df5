//! Match clock module
//!
//! Pure arithmetic over the four persisted timer fields of a match row.
//! Everything here is a read-only projection: callers pass the record
//! snapshot and the current instant, and get seconds, minutes or a
//! display string back. No I/O, no caching, no mutation.

pub mod display;
pub mod timer;

// Re-export main types and functions
pub use display::{
    event_minute_label, DEFAULT_MATCH_DURATION_MIN, FULL_TIME_LABEL, NOT_STARTED_CLOCK,
    NOT_STARTED_MINUTE,
};
pub use timer::{MatchStatus, MatchTimerState};
