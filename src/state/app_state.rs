//! Server-level state shared with HTTP handlers

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};

use super::TimerCore;
use crate::services::Alarm;

/// Everything a handler needs: the timer, its alarm and server metadata
pub struct AppState {
    pub timer: Arc<TimerCore>,
    pub alarm: Arc<Alarm>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(timer: Arc<TimerCore>, alarm: Arc<Alarm>, port: u16, host: String) -> Self {
        Self {
            timer,
            alarm,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Remember the most recent user interaction
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_state() -> AppState {
        let timer = TimerCore::new();
        let alarm = Arc::new(Alarm::new(None, timer.subscribe()));
        AppState::new(timer, alarm, 20554, "127.0.0.1".to_string())
    }

    #[test]
    fn test_record_action() {
        let state = app_state();
        assert_eq!(state.get_last_action(), (None, None));

        state.record_action("toggle");
        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("toggle"));
        assert!(time.is_some());
    }

    #[test]
    fn test_fresh_uptime_in_seconds() {
        assert!(app_state().get_uptime().ends_with('s'));
    }
}
