//! Main application state management

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::MatchStatus;
use super::{ClockSnapshot, EventKind, MatchEvent, MatchRecord, TeamSide, TransitionError};

/// Failure while reading or mutating the match registry
#[derive(Debug, Error)]
pub enum StateError {
    #[error("match {0} not found")]
    MatchNotFound(Uuid),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("failed to lock state: {0}")]
    Lock(String),
}

/// Main application state holding the match registry and channels
#[derive(Debug)]
pub struct AppState {
    /// All matches known to the server, keyed by id
    pub matches: Arc<Mutex<HashMap<Uuid, MatchRecord>>>,
    /// Nominal match length applied when a fixture does not set one
    pub default_duration_minutes: u32,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for match record changes
    pub match_change_tx: broadcast::Sender<MatchRecord>,
    /// Channel for per-second clock snapshots
    pub clock_update_tx: watch::Sender<Vec<ClockSnapshot>>,
    /// Keep the receiver alive to prevent channel closure
    pub _clock_update_rx: watch::Receiver<Vec<ClockSnapshot>>,
}

impl AppState {
    /// Create a new AppState with an empty match registry
    pub fn new(port: u16, host: String, default_duration_minutes: u32) -> Self {
        let (match_change_tx, _) = broadcast::channel(100);
        let (clock_update_tx, clock_update_rx) = watch::channel(Vec::new());

        Self {
            matches: Arc::new(Mutex::new(HashMap::new())),
            default_duration_minutes: default_duration_minutes.max(1),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            match_change_tx,
            clock_update_tx,
            _clock_update_rx: clock_update_rx,
        }
    }

    /// Register a new fixture awaiting kick-off
    pub fn create_match(
        &self,
        home_team: String,
        away_team: String,
        duration_minutes: Option<u32>,
    ) -> Result<MatchRecord, StateError> {
        let duration = duration_minutes.unwrap_or(self.default_duration_minutes);
        let record = MatchRecord::new(home_team, away_team, duration, Utc::now());

        let mut matches = self
            .matches
            .lock()
            .map_err(|e| StateError::Lock(e.to_string()))?;
        matches.insert(record.id, record.clone());
        drop(matches);

        info!(
            "Created match {}: {} vs {}",
            record.id, record.home_team, record.away_team
        );
        self.track_action("create-match");
        self.notify_change(record.clone());

        Ok(record)
    }

    /// Apply a mutation to one match and notify listeners
    pub fn update_match<F>(&self, id: Uuid, action: &str, updater: F) -> Result<MatchRecord, StateError>
    where
        F: FnOnce(&mut MatchRecord) -> Result<(), TransitionError>,
    {
        // Lock the registry and apply the update
        let mut matches = self
            .matches
            .lock()
            .map_err(|e| StateError::Lock(e.to_string()))?;
        let record = matches.get_mut(&id).ok_or(StateError::MatchNotFound(id))?;

        updater(record)?;
        let updated = record.clone();
        drop(matches); // Release the lock early

        self.track_action(action);
        self.notify_change(updated.clone());

        Ok(updated)
    }

    /// Kick a match off at the current wall-clock instant
    pub fn kick_off(&self, id: Uuid) -> Result<MatchRecord, StateError> {
        info!("Kicking off match {}", id);
        self.update_match(id, "kick-off", |record| record.kick_off(Utc::now()))
    }

    /// Pause the clock of a running match
    pub fn pause_match(&self, id: Uuid) -> Result<MatchRecord, StateError> {
        info!("Pausing match {}", id);
        self.update_match(id, "pause", |record| record.pause(Utc::now()))
    }

    /// Resume a paused match
    pub fn resume_match(&self, id: Uuid) -> Result<MatchRecord, StateError> {
        info!("Resuming match {}", id);
        self.update_match(id, "resume", |record| record.resume(Utc::now()))
    }

    /// Blow the final whistle
    pub fn finish_match(&self, id: Uuid) -> Result<MatchRecord, StateError> {
        info!("Finishing match {}", id);
        self.update_match(id, "full-time", |record| record.finish(Utc::now()))
    }

    /// Record a goal, card or substitution against a running match
    pub fn record_event(
        &self,
        id: Uuid,
        kind: EventKind,
        team: TeamSide,
        player: Option<String>,
    ) -> Result<(MatchRecord, MatchEvent), StateError> {
        let mut recorded = None;
        let record = self.update_match(id, "record-event", |record| {
            recorded = Some(record.record_event(kind, team, player, Utc::now())?);
            Ok(())
        })?;
        let event = recorded.ok_or_else(|| StateError::Lock("event not recorded".to_string()))?;

        info!("Recorded {:?} for match {} at {}", kind, id, event.minute_label);
        Ok((record, event))
    }

    /// Get one match by id
    pub fn get_match(&self, id: Uuid) -> Result<MatchRecord, StateError> {
        let matches = self
            .matches
            .lock()
            .map_err(|e| StateError::Lock(e.to_string()))?;
        matches
            .get(&id)
            .cloned()
            .ok_or(StateError::MatchNotFound(id))
    }

    /// All matches, oldest first
    pub fn list_matches(&self) -> Result<Vec<MatchRecord>, StateError> {
        let matches = self
            .matches
            .lock()
            .map_err(|e| StateError::Lock(e.to_string()))?;
        let mut all: Vec<MatchRecord> = matches.values().cloned().collect();
        all.sort_by_key(|record| record.created_at);
        Ok(all)
    }

    /// Clock snapshots of every in-progress match at `now`
    pub fn live_clocks(&self, now: DateTime<Utc>) -> Result<Vec<ClockSnapshot>, StateError> {
        let matches = self
            .matches
            .lock()
            .map_err(|e| StateError::Lock(e.to_string()))?;
        let mut snapshots: Vec<ClockSnapshot> = matches
            .values()
            .filter(|record| record.timer.status == MatchStatus::InProgress)
            .map(|record| record.clock_snapshot(now))
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.match_id);
        Ok(snapshots)
    }

    /// Publish a batch of clock snapshots to watchers
    pub fn publish_clocks(&self, snapshots: Vec<ClockSnapshot>) {
        if let Err(e) = self.clock_update_tx.send(snapshots) {
            warn!("Failed to send clock update: {}", e);
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn track_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn notify_change(&self, record: MatchRecord) {
        // No receivers is normal before any watcher subscribes
        if self.match_change_tx.receiver_count() > 0 {
            if let Err(e) = self.match_change_tx.send(record) {
                warn!("Failed to send match change notification: {}", e);
            }
        }
    }
}
