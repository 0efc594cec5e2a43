//! Utility functions module
//!
//! Input validation, display formatting and process signal handling.

pub mod format;
pub mod signals;
pub mod validation;

// Re-export main functions
pub use format::{format_hms, format_percent, pad_on_blur};
pub use signals::shutdown_signal;
pub use validation::{validate_time_input, TimeField, TimeRange};
