//! Terminal render surface

use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

use crate::{
    state::{RenderSurface, TimerView},
    utils::{format_hms, format_percent},
};

/// Logs the timer screen as a one-line readout.
///
/// Progress-only changes go to debug; anything a user would notice on the
/// screen (the clock, running, ready) is logged at info.
pub struct TerminalRenderer {
    last: Mutex<Option<TimerView>>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line readout such as `00:04:59 [ 83%] running`
pub fn readout(view: &TimerView) -> String {
    let status = match (view.is_running, view.is_ready) {
        (true, _) => "running",
        (false, true) => "ready",
        (false, false) => "idle",
    };
    format!(
        "{} [{:>4}] {}",
        format_hms(view.remaining_millis()),
        format_percent(view.progress),
        status
    )
}

impl RenderSurface for TerminalRenderer {
    fn render(&self, view: &TimerView) {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let visible_change = last.as_ref().map_or(true, |prev| {
            prev.remaining_millis() != view.remaining_millis()
                || prev.is_running != view.is_running
                || prev.is_ready != view.is_ready
        });

        if visible_change {
            info!("{}", readout(view));
        } else {
            debug!("{}", readout(view));
        }
        *last = Some(view.clone());
    }
}
