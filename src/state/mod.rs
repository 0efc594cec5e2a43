//! State management module
//!
//! The timer data model, the core that owns and mutates it, and the
//! server-level state handed to HTTP handlers.

pub mod app_state;
pub mod timer_core;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_core::{CompletionNotifier, InputOutcome, RenderSurface, TimerCore, ToggleOutcome};
pub use timer_state::{TimerState, TimerView};
