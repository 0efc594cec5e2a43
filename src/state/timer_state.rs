//! Timer state structure and time arithmetic

use serde::{Deserialize, Serialize};

pub const MILLIS_PER_HOUR: u64 = 3_600_000;
pub const MILLIS_PER_MINUTE: u64 = 60_000;
pub const MILLIS_PER_SECOND: u64 = 1_000;

/// Convert split duration fields into total milliseconds
pub fn to_millis(hours: u64, minutes: u64, seconds: u64) -> u64 {
    hours * MILLIS_PER_HOUR + minutes * MILLIS_PER_MINUTE + seconds * MILLIS_PER_SECOND
}

/// Split total milliseconds back into (hours, minutes, seconds)
pub fn split_millis(millis: u64) -> (u64, u64, u64) {
    let hours = millis / MILLIS_PER_HOUR;
    let minutes = (millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let seconds = (millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    (hours, minutes, seconds)
}

/// Everything one timer session knows about its countdown.
///
/// While idle the duration fields are the configured length; once running
/// they are the remaining time and are decremented in place.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// Total duration captured on the first tick of a run, 0 before that
    pub initial_millis: u64,
    pub progress: f32,
    pub is_running: bool,
    pub is_ready: bool,
    pub is_sound_enabled: bool,
}

impl TimerState {
    /// Create a zeroed, idle state with sound on
    pub fn new() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            initial_millis: 0,
            progress: 0.0,
            is_running: false,
            is_ready: false,
            is_sound_enabled: true,
        }
    }

    pub fn remaining_millis(&self) -> u64 {
        to_millis(self.hours, self.minutes, self.seconds)
    }

    /// Overwrite the duration fields from a millisecond total
    pub fn set_remaining_millis(&mut self, millis: u64) {
        let (hours, minutes, seconds) = split_millis(millis);
        self.hours = hours;
        self.minutes = minutes;
        self.seconds = seconds;
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// At least one duration field is nonzero
    pub fn is_ready_to_play(&self) -> bool {
        !self.is_zero()
    }

    /// Running with nothing left on the clock
    pub fn is_finished(&self) -> bool {
        self.is_running && self.is_zero()
    }

    /// Remaining time relative to the captured baseline, within [0, 1]
    pub fn progress_for(&self, millis: u64) -> f32 {
        if self.initial_millis == 0 {
            return 0.0;
        }
        (millis as f32 / self.initial_millis as f32).clamp(0.0, 1.0)
    }

    /// Back to the zeroed idle state. The sound preference survives.
    pub fn restart(&mut self) {
        self.is_running = false;
        self.is_ready = false;
        self.hours = 0;
        self.minutes = 0;
        self.seconds = 0;
        self.initial_millis = 0;
        self.progress = 0.0;
    }

    /// Snapshot handed to render surfaces
    pub fn view(&self) -> TimerView {
        TimerView {
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
            progress: self.progress,
            is_running: self.is_running,
            is_ready: self.is_ready,
            is_sound_enabled: self.is_sound_enabled,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// What a render surface needs to draw the timer screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub progress: f32,
    pub is_running: bool,
    pub is_ready: bool,
    pub is_sound_enabled: bool,
}

impl TimerView {
    pub fn remaining_millis(&self) -> u64 {
        to_millis(self.hours, self.minutes, self.seconds)
    }
}

impl Default for TimerView {
    fn default() -> Self {
        TimerState::new().view()
    }
}
