//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerView;

/// Advisory shown when start is pressed with no time selected
pub const SELECT_TIME_NOTICE: &str = "Select a time first";

/// API response structure for timer interaction endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: impl Into<String>, timer: TimerView) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Input was taken into the timer
    pub fn accepted(message: impl Into<String>, timer: TimerView) -> Self {
        Self::new("accepted", message, timer)
    }

    /// Input was ignored and the timer is unchanged
    pub fn rejected(message: impl Into<String>, timer: TimerView) -> Self {
        Self::new("rejected", message, timer)
    }

    pub fn running(message: impl Into<String>, timer: TimerView) -> Self {
        Self::new("running", message, timer)
    }

    pub fn paused(message: impl Into<String>, timer: TimerView) -> Self {
        Self::new("paused", message, timer)
    }

    pub fn idle(message: impl Into<String>, timer: TimerView) -> Self {
        Self::new("idle", message, timer)
    }
}

/// Status response with a formatted readout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub readout: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
