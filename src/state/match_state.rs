//! Match record structure and lifecycle transitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::clock::{event_minute_label, MatchStatus, MatchTimerState};

/// Rejected lifecycle transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("match has already kicked off")]
    AlreadyStarted,
    #[error("match is not in progress")]
    NotInProgress,
    #[error("match is already paused")]
    AlreadyPaused,
    #[error("match is not paused")]
    NotPaused,
    #[error("match has already finished")]
    AlreadyFinished,
}

/// Kind of discrete match event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    YellowCard,
    RedCard,
    Substitution,
}

/// Which side of the fixture an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

/// A discrete in-match event (goal, card, substitution)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEvent {
    pub kind: EventKind,
    pub team: TeamSide,
    pub player: Option<String>,
    /// Match minute the event happened in
    pub minute: u64,
    /// Minute in stoppage-time notation, e.g. `12' + 3`
    pub minute_label: String,
    pub recorded_at: DateTime<Utc>,
}

/// A single fixture: teams, score, events and the persisted timer fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    /// Nominal match length in minutes, used for minute labels
    pub duration_minutes: u32,
    pub timer: MatchTimerState,
    pub events: Vec<MatchEvent>,
    pub created_at: DateTime<Utc>,
}

/// Derived clock view of a match at a given instant.
///
/// This is what the ticker publishes and what API responses embed, so
/// every consumer renders the same clock from the same row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub match_id: Uuid,
    pub status: MatchStatus,
    pub elapsed_seconds: u64,
    pub minute: u64,
    pub clock: String,
    pub minute_label: String,
    pub paused: bool,
}

impl MatchRecord {
    /// Create a new fixture awaiting kick-off
    pub fn new(home_team: String, away_team: String, duration_minutes: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            home_team,
            away_team,
            home_score: 0,
            away_score: 0,
            duration_minutes: duration_minutes.max(1),
            timer: MatchTimerState::default(),
            events: Vec::new(),
            created_at: now,
        }
    }

    /// Kick the match off, stamping the start of the clock
    pub fn kick_off(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        match self.timer.status {
            MatchStatus::Finished => return Err(TransitionError::AlreadyFinished),
            MatchStatus::InProgress | MatchStatus::Paused => {
                return Err(TransitionError::AlreadyStarted)
            }
            MatchStatus::NotStarted => {}
        }

        self.timer = MatchTimerState {
            started_at: Some(now.to_rfc3339()),
            paused_at: None,
            total_paused_seconds: 0,
            status: MatchStatus::InProgress,
        };
        Ok(())
    }

    /// Open a pause interval; the clock freezes until `resume`
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        if self.timer.status != MatchStatus::InProgress {
            return Err(TransitionError::NotInProgress);
        }
        if self.timer.paused_at.is_some() {
            return Err(TransitionError::AlreadyPaused);
        }
        self.timer.paused_at = Some(now.to_rfc3339());
        Ok(())
    }

    /// Close the open pause interval, folding it into the stored total
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        if self.timer.status != MatchStatus::InProgress {
            return Err(TransitionError::NotInProgress);
        }
        if self.timer.paused_at.is_none() {
            return Err(TransitionError::NotPaused);
        }
        self.close_open_pause(now);
        Ok(())
    }

    /// End the match; any open pause is closed first
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        match self.timer.status {
            MatchStatus::Finished => return Err(TransitionError::AlreadyFinished),
            MatchStatus::NotStarted | MatchStatus::Paused => {
                return Err(TransitionError::NotInProgress)
            }
            MatchStatus::InProgress => {}
        }
        self.close_open_pause(now);
        self.timer.status = MatchStatus::Finished;
        Ok(())
    }

    /// Record a goal, card or substitution at the current match minute.
    ///
    /// Goals bump the scoring side. The minute label uses stoppage-time
    /// notation past the nominal length.
    pub fn record_event(
        &mut self,
        kind: EventKind,
        team: TeamSide,
        player: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<MatchEvent, TransitionError> {
        if self.timer.status != MatchStatus::InProgress {
            return Err(TransitionError::NotInProgress);
        }

        let minute = self.timer.current_minute(now);
        let event = MatchEvent {
            kind,
            team,
            player,
            minute,
            minute_label: event_minute_label(minute, self.duration_minutes),
            recorded_at: now,
        };

        if kind == EventKind::Goal {
            match team {
                TeamSide::Home => self.home_score += 1,
                TeamSide::Away => self.away_score += 1,
            }
        }

        self.events.push(event.clone());
        Ok(event)
    }

    /// Derive the clock view of this match at `now`
    pub fn clock_snapshot(&self, now: DateTime<Utc>) -> ClockSnapshot {
        ClockSnapshot {
            match_id: self.id,
            status: self.timer.status,
            elapsed_seconds: self.timer.elapsed_seconds(now),
            minute: self.timer.current_minute(now),
            clock: self.timer.clock_display(now),
            minute_label: self.timer.minute_display(self.duration_minutes, now),
            paused: self.timer.is_paused(),
        }
    }

    fn close_open_pause(&mut self, now: DateTime<Utc>) {
        if let Some(pause_start) = self.timer.open_pause() {
            self.timer.total_paused_seconds += (now - pause_start).num_seconds().max(0);
        }
        self.timer.paused_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 9, 18, 0, 0).unwrap()
    }

    fn fresh_match() -> MatchRecord {
        MatchRecord::new("Rojos".to_string(), "Azules".to_string(), 12, kickoff())
    }

    #[test]
    fn full_lifecycle_accumulates_pauses() {
        let mut record = fresh_match();
        record.kick_off(kickoff()).unwrap();

        record.pause(kickoff() + Duration::seconds(60)).unwrap();
        record.resume(kickoff() + Duration::seconds(90)).unwrap();
        assert_eq!(record.timer.total_paused_seconds, 30);
        assert!(record.timer.paused_at.is_none());

        // Clock at 2:05 of wall time has played 1:35
        let now = kickoff() + Duration::seconds(125);
        assert_eq!(record.timer.elapsed_seconds(now), 95);

        record.finish(now).unwrap();
        assert_eq!(record.timer.status, MatchStatus::Finished);
        assert_eq!(record.timer.elapsed_seconds(now), 0);
    }

    #[test]
    fn finish_closes_an_open_pause() {
        let mut record = fresh_match();
        record.kick_off(kickoff()).unwrap();
        record.pause(kickoff() + Duration::seconds(100)).unwrap();
        record.finish(kickoff() + Duration::seconds(160)).unwrap();

        assert_eq!(record.timer.total_paused_seconds, 60);
        assert!(record.timer.paused_at.is_none());
        assert_eq!(record.timer.status, MatchStatus::Finished);
    }

    #[test]
    fn transitions_are_guarded() {
        let mut record = fresh_match();
        assert_eq!(
            record.pause(kickoff()),
            Err(TransitionError::NotInProgress)
        );
        assert_eq!(
            record.resume(kickoff()),
            Err(TransitionError::NotInProgress)
        );
        assert_eq!(
            record.finish(kickoff()),
            Err(TransitionError::NotInProgress)
        );

        record.kick_off(kickoff()).unwrap();
        assert_eq!(
            record.kick_off(kickoff()),
            Err(TransitionError::AlreadyStarted)
        );
        assert_eq!(
            record.resume(kickoff()),
            Err(TransitionError::NotPaused)
        );

        record.pause(kickoff() + Duration::seconds(10)).unwrap();
        assert_eq!(
            record.pause(kickoff() + Duration::seconds(20)),
            Err(TransitionError::AlreadyPaused)
        );

        record.finish(kickoff() + Duration::seconds(30)).unwrap();
        assert_eq!(
            record.finish(kickoff() + Duration::seconds(40)),
            Err(TransitionError::AlreadyFinished)
        );
        assert_eq!(
            record.kick_off(kickoff() + Duration::seconds(40)),
            Err(TransitionError::AlreadyFinished)
        );
    }

    #[test]
    fn goals_bump_the_scoring_side() {
        let mut record = fresh_match();
        record.kick_off(kickoff()).unwrap();

        let now = kickoff() + Duration::seconds(200);
        record
            .record_event(EventKind::Goal, TeamSide::Home, Some("Marta".to_string()), now)
            .unwrap();
        record
            .record_event(EventKind::YellowCard, TeamSide::Away, None, now)
            .unwrap();

        assert_eq!(record.home_score, 1);
        assert_eq!(record.away_score, 0);
        assert_eq!(record.events.len(), 2);
        assert_eq!(record.events[0].minute, 3);
        assert_eq!(record.events[0].minute_label, "3'");
    }

    #[test]
    fn late_events_get_stoppage_labels() {
        let mut record = fresh_match();
        record.kick_off(kickoff()).unwrap();

        let deep_in_stoppage = kickoff() + Duration::seconds(15 * 60);
        let event = record
            .record_event(EventKind::Goal, TeamSide::Away, None, deep_in_stoppage)
            .unwrap();
        assert_eq!(event.minute, 15);
        assert_eq!(event.minute_label, "12' + 3");
    }

    #[test]
    fn events_require_a_running_match() {
        let mut record = fresh_match();
        assert_eq!(
            record
                .record_event(EventKind::Goal, TeamSide::Home, None, kickoff())
                .unwrap_err(),
            TransitionError::NotInProgress
        );
    }

    #[test]
    fn snapshot_reflects_the_running_clock() {
        let mut record = fresh_match();
        record.kick_off(kickoff()).unwrap();

        let snapshot = record.clock_snapshot(kickoff() + Duration::seconds(125));
        assert_eq!(snapshot.elapsed_seconds, 125);
        assert_eq!(snapshot.minute, 2);
        assert_eq!(snapshot.clock, "02:05");
        assert_eq!(snapshot.minute_label, "2'");
        assert!(!snapshot.paused);

        record.pause(kickoff() + Duration::seconds(130)).unwrap();
        let paused = record.clock_snapshot(kickoff() + Duration::seconds(150));
        assert!(paused.paused);
        // Open pause keeps the clock pinned where it was
        assert_eq!(paused.elapsed_seconds, 130);
    }
}
