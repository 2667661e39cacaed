//! Remaining Time - a clock-skew corrected countdown engine
//! 
//! This is the main entry point for the remaining-time host server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use remaining_time::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::signal_relay_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("remaining_time={},tower_http=info", config.log_level()))
        .init();

    let thresholds = config.alert_thresholds_minutes();
    info!("Starting remaining-time server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, alert thresholds={:?}min",
          config.host, config.port, thresholds);

    // Create application state and the countdown signal stream
    let (state, signals) = AppState::new(config.port, config.host.clone(), thresholds);
    let state = Arc::new(state);

    // Route countdown signals to notifications in the background
    let relay_state = Arc::clone(&state);
    tokio::spawn(async move {
        signal_relay_task(relay_state, signals).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /countdown      - Start or restart the countdown");
    info!("  POST /countdown/stop - Stop the countdown");
    info!("  GET  /time-sync      - Current clock offset");
    info!("  PUT  /time-sync      - Update the clock offset");
    info!("  GET  /status         - Countdown status and notifications");
    info!("  GET  /health         - Health check");

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

    state.stop_countdown();
    info!("Server shutdown complete");
    Ok(())
}
