//! Countdown Timer - a single-screen countdown timer core
//!
//! This library provides the timer state machine (duration fields, start,
//! pause, restart and the one-second countdown loop) together with the host
//! pieces that drive it: input validation, an alarm, a terminal readout and
//! an HTTP control surface.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerCore, TimerView};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
