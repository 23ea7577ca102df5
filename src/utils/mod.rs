//! Utility functions module
//!
//! Process-level helpers that do not belong to any one feature.

pub mod signals;

// Re-export main functions
pub use signals::shutdown_signal;
