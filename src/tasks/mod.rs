//! Background tasks module
//!
//! This module contains the countdown loop that runs while a timer is started.

pub mod countdown;

// Re-export main functions
pub use countdown::{countdown_task, TICK_PERIOD};
