//! Configuration and CLI argument handling

use clap::Parser;

use crate::clock::DEFAULT_MATCH_DURATION_MIN;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "match-clock")]
#[command(about = "A state-managed HTTP server for live football match clocks")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Nominal match length in minutes
    #[arg(short, long, default_value_t = DEFAULT_MATCH_DURATION_MIN)]
    pub duration: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Nominal match length, clamped to at least one minute
    pub fn duration_minutes(&self) -> u32 {
        self.duration.max(1)
    }
}
