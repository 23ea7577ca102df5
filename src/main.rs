//! Match Clock - A state-managed HTTP server for live football match clocks
//!
//! This is the main entry point for the match-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use match_clock::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::clock_ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("match_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting match-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, match duration={}min",
        config.host,
        config.port,
        config.duration_minutes()
    );

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.duration_minutes(),
    ));

    // Start the clock ticker background task
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        clock_ticker_task(ticker_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /matches                 - Register a fixture");
    info!("  POST /matches/:id/kick-off    - Start the match clock");
    info!("  POST /matches/:id/pause       - Freeze the clock");
    info!("  POST /matches/:id/resume      - Restart the clock");
    info!("  POST /matches/:id/full-time   - End the match");
    info!("  POST /matches/:id/events      - Record a goal or card");
    info!("  GET  /matches                 - List matches with clocks");
    info!("  GET  /matches/:id             - Fetch one match");
    info!("  GET  /status                  - Server status");
    info!("  GET  /health                  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
