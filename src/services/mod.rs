//! Host-side collaborators module
//!
//! The completion alarm and the terminal render surface the timer core
//! reports to.

pub mod alarm;
pub mod render;

// Re-export main types
pub use alarm::Alarm;
pub use render::{readout, TerminalRenderer};
