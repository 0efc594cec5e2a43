//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, info, warn};

use crate::{
    services::readout,
    state::{AppState, InputOutcome, ToggleOutcome},
    utils::{pad_on_blur, TimeField},
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse, SELECT_TIME_NOTICE};

/// Handle PUT /fields/:field - Text typed into a duration field
pub async fn field_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
    text: String,
) -> Result<Json<ApiResponse>, StatusCode> {
    let field: TimeField = field.parse().map_err(|e| {
        debug!("{}", e);
        StatusCode::NOT_FOUND
    })?;

    state.record_action(field.name());
    match state.timer.enter_text(field, &text) {
        InputOutcome::Accepted(value) => {
            info!("{} set to {}", field, pad_on_blur(value));
            Ok(Json(ApiResponse::accepted(
                format!("{} set to {}", field, pad_on_blur(value)),
                state.timer.view(),
            )))
        }
        InputOutcome::Rejected => Ok(Json(ApiResponse::rejected(
            format!("{:?} is not a valid value for {}", text, field),
            state.timer.view(),
        ))),
        InputOutcome::Locked => {
            warn!("Tried to edit {} while the timer is running", field);
            Err(StatusCode::CONFLICT)
        }
    }
}

/// Handle POST /toggle - Start or pause the countdown
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.record_action("toggle");
    let outcome = state.timer.toggle_run();
    let view = state.timer.view();

    Json(match outcome {
        ToggleOutcome::Started => ApiResponse::running("Timer started", view),
        ToggleOutcome::Paused => ApiResponse::paused("Timer paused", view),
        ToggleOutcome::NotReady => ApiResponse::idle(SELECT_TIME_NOTICE, view),
    })
}

/// Handle POST /restart - Zero the timer and silence the alarm
pub async fn restart_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.record_action("restart");
    state.timer.restart();
    state.alarm.stop();
    Json(ApiResponse::idle("Timer restarted", state.timer.view()))
}

/// Handle POST /sound - Flip the sound preference
pub async fn sound_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.record_action("sound");
    let enabled = state.timer.toggle_sound();
    if !enabled {
        state.alarm.stop();
    }

    Json(ApiResponse::accepted(
        if enabled { "Sound on" } else { "Sound off" },
        state.timer.view(),
    ))
}

/// Handle GET /status - Return the current timer screen
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timer = state.timer.view();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        readout: readout(&timer),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
