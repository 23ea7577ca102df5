//! Elapsed-time arithmetic for a single match

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a match, as stored in the row.
///
/// The store holds this as free text, so deserialization is lenient:
/// anything that is not a known value behaves like `NotStarted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchStatus {
    #[default]
    NotStarted,
    InProgress,
    Paused,
    Finished,
}

impl MatchStatus {
    /// Parse a stored status value, mapping unknown text to `NotStarted`
    pub fn parse(raw: &str) -> Self {
        match raw {
            "in_progress" => Self::InProgress,
            "paused" => Self::Paused,
            "finished" => Self::Finished,
            _ => Self::NotStarted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }
}

impl From<String> for MatchStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<MatchStatus> for String {
    fn from(status: MatchStatus) -> Self {
        status.as_str().to_string()
    }
}

/// The four timer fields of a match row.
///
/// Timestamps are kept as the RFC 3339 text the store persists. They are
/// parsed on every read; text that does not parse counts as absent, so a
/// corrupted row degrades to a zeroed clock instead of an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTimerState {
    /// Set once when the match kicks off
    #[serde(default)]
    pub started_at: Option<String>,
    /// Present only while a pause interval is open
    #[serde(default)]
    pub paused_at: Option<String>,
    /// Accumulated seconds of all closed pause intervals
    #[serde(default)]
    pub total_paused_seconds: i64,
    #[serde(default)]
    pub status: MatchStatus,
}

/// Parse a stored timestamp, treating unparseable text as absent
fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
}

impl MatchTimerState {
    /// Playing seconds elapsed at `now`: wall-clock time since kick-off
    /// minus all paused time, floored to whole seconds.
    ///
    /// Returns 0 unless the match is in progress with a readable
    /// kick-off timestamp. An open pause contributes its live duration
    /// on top of the stored total. The result is clamped at 0, whatever
    /// the timestamps claim.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        if self.status != MatchStatus::InProgress {
            return 0;
        }
        let Some(started) = parse_timestamp(self.started_at.as_deref()) else {
            return 0;
        };

        let raw = (now - started).num_seconds();
        let mut paused = self.total_paused_seconds.max(0);
        if let Some(pause_start) = parse_timestamp(self.paused_at.as_deref()) {
            paused += (now - pause_start).num_seconds().max(0);
        }

        (raw - paused).max(0) as u64
    }

    /// Current match minute at `now`
    pub fn current_minute(&self, now: DateTime<Utc>) -> u64 {
        self.elapsed_seconds(now) / 60
    }

    /// Whether the match is running with an open pause interval
    pub fn is_paused(&self) -> bool {
        self.status == MatchStatus::InProgress
            && parse_timestamp(self.paused_at.as_deref()).is_some()
    }

    /// Kick-off timestamp, if present and readable
    pub(crate) fn started(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.started_at.as_deref())
    }

    /// Open pause start, if present and readable
    pub(crate) fn open_pause(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.paused_at.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 9, 18, 0, 0).unwrap()
    }

    fn running_since(started: DateTime<Utc>) -> MatchTimerState {
        MatchTimerState {
            started_at: Some(started.to_rfc3339()),
            status: MatchStatus::InProgress,
            ..Default::default()
        }
    }

    #[test]
    fn counts_seconds_since_kick_off() {
        let state = running_since(kickoff());
        let now = kickoff() + Duration::seconds(125);
        assert_eq!(state.elapsed_seconds(now), 125);
        assert_eq!(state.current_minute(now), 2);
    }

    #[test]
    fn stored_pause_total_is_subtracted() {
        let state = MatchTimerState {
            total_paused_seconds: 30,
            ..running_since(kickoff())
        };
        let now = kickoff() + Duration::seconds(125);
        assert_eq!(state.elapsed_seconds(now), 95);
    }

    #[test]
    fn open_pause_contributes_live() {
        let state = MatchTimerState {
            paused_at: Some((kickoff() + Duration::seconds(60)).to_rfc3339()),
            ..running_since(kickoff())
        };
        let now = kickoff() + Duration::seconds(90);
        assert_eq!(state.elapsed_seconds(now), 60);
    }

    #[test]
    fn zero_unless_in_progress() {
        let now = kickoff() + Duration::seconds(300);
        for status in [MatchStatus::NotStarted, MatchStatus::Paused, MatchStatus::Finished] {
            let state = MatchTimerState {
                status,
                ..running_since(kickoff())
            };
            assert_eq!(state.elapsed_seconds(now), 0, "status {:?}", status);
        }
    }

    #[test]
    fn missing_kick_off_reads_as_zero() {
        let state = MatchTimerState {
            status: MatchStatus::InProgress,
            ..Default::default()
        };
        assert_eq!(state.elapsed_seconds(kickoff()), 0);
    }

    #[test]
    fn unreadable_timestamps_read_as_zero() {
        let state = MatchTimerState {
            started_at: Some("yesterday evening".to_string()),
            status: MatchStatus::InProgress,
            ..Default::default()
        };
        assert_eq!(state.elapsed_seconds(kickoff()), 0);
    }

    #[test]
    fn never_negative_under_adversarial_input() {
        // Kick-off in the future
        let future = running_since(kickoff() + Duration::seconds(600));
        assert_eq!(future.elapsed_seconds(kickoff()), 0);

        // Pause total larger than the whole match
        let over_paused = MatchTimerState {
            total_paused_seconds: 10_000,
            ..running_since(kickoff())
        };
        assert_eq!(over_paused.elapsed_seconds(kickoff() + Duration::seconds(90)), 0);

        // Negative stored total must not inflate the clock
        let negative_total = MatchTimerState {
            total_paused_seconds: -500,
            ..running_since(kickoff())
        };
        assert_eq!(
            negative_total.elapsed_seconds(kickoff() + Duration::seconds(90)),
            90
        );

        // Pause that claims to start before now was reached
        let inverted_pause = MatchTimerState {
            paused_at: Some((kickoff() + Duration::seconds(500)).to_rfc3339()),
            ..running_since(kickoff())
        };
        assert_eq!(
            inverted_pause.elapsed_seconds(kickoff() + Duration::seconds(90)),
            90
        );
    }

    #[test]
    fn minute_matches_elapsed_seconds() {
        let state = MatchTimerState {
            total_paused_seconds: 45,
            ..running_since(kickoff())
        };
        for offset in [0, 59, 60, 61, 719, 720, 3600] {
            let now = kickoff() + Duration::seconds(offset);
            assert_eq!(state.current_minute(now), state.elapsed_seconds(now) / 60);
        }
    }

    #[test]
    fn projection_is_repeatable() {
        let state = MatchTimerState {
            paused_at: Some((kickoff() + Duration::seconds(30)).to_rfc3339()),
            total_paused_seconds: 12,
            ..running_since(kickoff())
        };
        let now = kickoff() + Duration::seconds(200);
        assert_eq!(state.elapsed_seconds(now), state.elapsed_seconds(now));
    }

    #[test]
    fn unknown_status_text_behaves_like_not_started() {
        assert_eq!(MatchStatus::parse("halftime"), MatchStatus::NotStarted);
        assert_eq!(MatchStatus::parse(""), MatchStatus::NotStarted);
        assert_eq!(MatchStatus::parse("in_progress"), MatchStatus::InProgress);

        let row = r#"{"started_at":null,"paused_at":null,"total_paused_seconds":0,"status":"abandoned"}"#;
        let state: MatchTimerState = serde_json::from_str(row).unwrap();
        assert_eq!(state.status, MatchStatus::NotStarted);
    }

    #[test]
    fn row_with_missing_fields_deserializes() {
        let state: MatchTimerState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, MatchTimerState::default());
        assert_eq!(state.elapsed_seconds(kickoff()), 0);
    }
}
