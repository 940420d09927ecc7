//! Scoreboard - A two-team scoreboard server
//!
//! This is the main entry point for the scoreboard application.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::watch};
use tracing::info;

use scoreboard::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::timer_driver_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("scoreboard={},tower_http=info", config.log_level()))
        .init();

    info!("Starting scoreboard server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, quiet={}", config.host, config.port, config.quiet);

    // Create application state with a fresh game
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.feedback()));
    state.store.create_game();

    // Start the timer driver background task
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let driver = tokio::spawn(timer_driver_task(Arc::clone(&state), shutdown_rx));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET|POST /game             - Current game / new game");
    info!("  POST     /teams/:id/score  - Change a team's score");
    info!("  POST     /quarter/next     - Save and move to the next quarter");
    info!("  POST     /timer/start      - Start the countdown");
    info!("  GET      /records          - Quarter records table");
    info!("  GET      /status           - Game, timer and server status");

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

    // Stop ticking before exit
    let _ = shutdown_tx.send(true);
    if let Err(e) = driver.await {
        tracing::error!("Timer driver task failed: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
