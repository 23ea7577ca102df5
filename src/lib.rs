//! Match Clock - A state-managed HTTP server for live football match clocks
//!
//! This library keeps the club's match records and derives every clock
//! display from four persisted timer fields, so all viewers agree on
//! the elapsed time without a server push each second.

pub mod config;
pub mod clock;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use clock::{MatchStatus, MatchTimerState};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
