//! Countdown Timer - a single-screen countdown timer driven over HTTP
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use countdown_timer::{
    config::Config,
    state::{AppState, InputOutcome, TimerCore, ToggleOutcome},
    api::{create_router, responses::SELECT_TIME_NOTICE},
    services::{Alarm, TerminalRenderer},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer v{}", env!("CARGO_PKG_VERSION"));

    // Timer core with its host-side collaborators
    let timer = TimerCore::new();
    let alarm = Arc::new(Alarm::new(config.alarm_command.clone(), timer.subscribe()));
    timer.set_completion_notifier(alarm.clone());
    timer.add_render_surface(Arc::new(TerminalRenderer::new()));

    if config.mute {
        timer.set_sound_enabled(false);
    }
    for (field, text) in config.initial_fields() {
        if timer.enter_text(field, text) == InputOutcome::Rejected {
            warn!("Ignoring invalid {} value: {:?}", field, text);
        }
    }
    if config.start && timer.toggle_run() == ToggleOutcome::NotReady {
        warn!("{}", SELECT_TIME_NOTICE);
    }

    let state = Arc::new(AppState::new(
        Arc::clone(&timer),
        Arc::clone(&alarm),
        config.port,
        config.host.clone(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  PUT  /fields/:field - Type into hours, minutes or seconds");
    info!("  POST /toggle        - Start or pause the countdown");
    info!("  POST /restart       - Zero the timer");
    info!("  POST /sound         - Toggle the alarm sound");
    info!("  GET  /status        - Current timer readout");
    info!("  GET  /health        - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(_) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for signals: {}", e),
            }
        }
    }

    timer.shutdown();
    alarm.stop();

    info!("Server shutdown complete");
    Ok(())
}
