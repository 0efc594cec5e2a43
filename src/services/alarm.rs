//! Completion alarm: the host side of the finish notification

use std::{
    io::Write,
    sync::{Mutex, PoisonError},
};
use tokio::{
    process::{Child, Command},
    sync::watch,
};
use tracing::{debug, info, warn};

use crate::state::{CompletionNotifier, TimerView};

/// Plays the alarm when a countdown finishes, if sound is enabled.
///
/// With no command configured the alarm is a terminal bell. A command is run
/// through `sh -c` and can be stopped while it is still playing.
pub struct Alarm {
    command: Option<String>,
    timer_rx: watch::Receiver<TimerView>,
    playing: Mutex<Option<Child>>,
}

impl Alarm {
    pub fn new(command: Option<String>, timer_rx: watch::Receiver<TimerView>) -> Self {
        Self {
            command,
            timer_rx,
            playing: Mutex::new(None),
        }
    }

    fn sound_enabled(&self) -> bool {
        self.timer_rx.borrow().is_sound_enabled
    }

    /// Start the alarm, replacing one that is still playing
    pub fn ring(&self) -> Result<(), String> {
        self.stop();

        let Some(command) = &self.command else {
            let mut stdout = std::io::stdout();
            return stdout
                .write_all(b"\x07")
                .and_then(|_| stdout.flush())
                .map_err(|e| format!("Failed to ring terminal bell: {}", e));
        };

        debug!("Running alarm command: {}", command);
        let child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("Failed to run alarm command: {}", e))?;

        *self.playing.lock().unwrap_or_else(PoisonError::into_inner) = Some(child);
        Ok(())
    }

    /// Whether an alarm command is still running
    pub fn is_playing(&self) -> bool {
        let mut playing = self.playing.lock().unwrap_or_else(PoisonError::into_inner);
        match playing.as_mut().map(|child| child.try_wait()) {
            Some(Ok(None)) => true,
            Some(Ok(Some(_))) | Some(Err(_)) => {
                *playing = None;
                false
            }
            None => false,
        }
    }

    /// Silence an alarm that is still playing
    pub fn stop(&self) {
        if !self.is_playing() {
            return;
        }
        let child = self.playing.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(mut child) = child {
            match child.start_kill() {
                Ok(()) => info!("Alarm stopped"),
                Err(e) => warn!("Failed to stop alarm: {}", e),
            }
        }
    }
}

impl CompletionNotifier for Alarm {
    fn on_finish(&self) {
        info!("Time is up");
        if !self.sound_enabled() {
            debug!("Sound is off, alarm stays silent");
            return;
        }
        if let Err(e) = self.ring() {
            warn!("{}", e);
        }
    }
}
