//! Display formatting for match clocks and event minutes

use chrono::{DateTime, Utc};

use super::timer::{MatchStatus, MatchTimerState};

/// Label shown once a match has finished
pub const FULL_TIME_LABEL: &str = "Finalizado";

/// Clock placeholder before kick-off
pub const NOT_STARTED_CLOCK: &str = "--:--";

/// Minute placeholder before kick-off
pub const NOT_STARTED_MINUTE: &str = "--";

/// Nominal match length in minutes for the club's short format
pub const DEFAULT_MATCH_DURATION_MIN: u32 = 12;

/// Label a discrete event with its match minute.
///
/// Minutes past the nominal length use stoppage-time notation, so an
/// event in minute 15 of a 12-minute match reads `12' + 3`. A zero
/// duration is treated as 1; the notation needs at least one regulation
/// minute.
pub fn event_minute_label(minute: u64, match_duration: u32) -> String {
    let nominal = u64::from(match_duration.max(1));
    if minute <= nominal {
        format!("{}'", minute)
    } else {
        format!("{}' + {}", nominal, minute - nominal)
    }
}

impl MatchTimerState {
    /// Clock text for the scoreboard: `MM:SS` while playing, a
    /// placeholder before kick-off and the full-time label afterwards.
    ///
    /// Minutes keep counting past 99 rather than wrapping; seconds are
    /// always two digits.
    pub fn clock_display(&self, now: DateTime<Utc>) -> String {
        if self.status == MatchStatus::Finished {
            return FULL_TIME_LABEL.to_string();
        }
        if self.status != MatchStatus::InProgress || self.started().is_none() {
            return NOT_STARTED_CLOCK.to_string();
        }
        let total = self.elapsed_seconds(now);
        format!("{:02}:{:02}", total / 60, total % 60)
    }

    /// Minute text for event tickers: the current minute in
    /// stoppage-time notation, with the same terminal handling as
    /// [`clock_display`](Self::clock_display).
    pub fn minute_display(&self, match_duration: u32, now: DateTime<Utc>) -> String {
        if self.status == MatchStatus::Finished {
            return FULL_TIME_LABEL.to_string();
        }
        if self.status != MatchStatus::InProgress || self.started().is_none() {
            return NOT_STARTED_MINUTE.to_string();
        }
        event_minute_label(self.current_minute(now), match_duration)
    }
}
