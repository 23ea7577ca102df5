//! Clock ticker background task

use std::{sync::Arc, time::Duration};
use chrono::Utc;
use tokio::time::interval;
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that republishes clock snapshots once per second.
///
/// Viewers render from the snapshots on the watch channel, so everyone
/// shows the same clock derived from the same stored timestamps. The
/// task only reads; match records are mutated through the API.
pub async fn clock_ticker_task(state: Arc<AppState>) {
    info!("Starting clock ticker task");

    let mut interval = interval(Duration::from_secs(1));

    loop {
        interval.tick().await;

        match state.live_clocks(Utc::now()) {
            Ok(snapshots) => {
                if !snapshots.is_empty() {
                    debug!("Publishing {} live clock(s)", snapshots.len());
                }
                state.publish_clocks(snapshots);
            }
            Err(e) => {
                error!("Failed to read match clocks: {}", e);
            }
        }
    }
}
