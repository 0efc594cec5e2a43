//! Timer core: the state container behind one timer screen
//!
//! All mutation goes through [`TimerCore`], which republishes a
//! [`TimerView`] to its watch channel and to every registered
//! [`RenderSurface`] whenever the visible state changes.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError},
};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::timer_state::{TimerState, TimerView, MILLIS_PER_SECOND};
use crate::{
    tasks::countdown_task,
    utils::validation::{validate_time_input, TimeField},
};

/// Something that draws the timer.
///
/// Every change is rendered exactly once, in the order the changes were
/// made. When several threads mutate the core at once, one of them renders
/// on behalf of the others, so a mutating call may return before its own
/// view has been drawn. A surface may call back into the core.
pub trait RenderSurface: Send + Sync {
    fn render(&self, view: &TimerView);
}

/// Told once per countdown that runs out on its own
pub trait CompletionNotifier: Send + Sync {
    fn on_finish(&self);
}

impl<F> CompletionNotifier for F
where
    F: Fn() + Send + Sync,
{
    fn on_finish(&self) {
        self()
    }
}

/// Result of a start/pause press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Paused,
    /// Nothing to count down; the host should ask for a time first
    NotReady,
}

/// Result of typing into a duration field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Accepted(u64),
    Rejected,
    /// Fields are not editable while running
    Locked,
}

/// What the countdown loop should do at the top of an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickCheck {
    Continue,
    Finished,
    Halted,
}

#[derive(Debug)]
struct Inner {
    state: TimerState,
    /// Bumped on every restart; loops from an older epoch stand down
    epoch: u64,
    /// A countdown task for the current epoch is alive
    loop_active: bool,
}

impl Inner {
    fn owns(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// Drop the loop's claim if it is still the current one
    fn release(&mut self, epoch: u64) {
        if self.owns(epoch) {
            self.loop_active = false;
        }
    }
}

pub struct TimerCore {
    inner: Mutex<Inner>,
    surfaces: Mutex<Vec<Arc<dyn RenderSurface>>>,
    /// Views waiting to be rendered, queued under the state lock
    pending: Mutex<VecDeque<TimerView>>,
    /// Held by whichever thread is currently rendering
    dispatching: Mutex<()>,
    notifier: Mutex<Option<Arc<dyn CompletionNotifier>>>,
    view_tx: watch::Sender<TimerView>,
    /// Keep the receiver alive to prevent channel closure
    _view_rx: watch::Receiver<TimerView>,
}

impl TimerCore {
    /// Create a zeroed, idle timer
    pub fn new() -> Arc<Self> {
        let state = TimerState::new();
        let (view_tx, view_rx) = watch::channel(state.view());

        Arc::new(Self {
            inner: Mutex::new(Inner {
                state,
                epoch: 0,
                loop_active: false,
            }),
            surfaces: Mutex::new(Vec::new()),
            pending: Mutex::new(VecDeque::new()),
            dispatching: Mutex::new(()),
            notifier: Mutex::new(None),
            view_tx,
            _view_rx: view_rx,
        })
    }

    /// Create a timer that reports natural completion to `notifier`
    pub fn with_notifier(notifier: impl CompletionNotifier + 'static) -> Arc<Self> {
        let core = Self::new();
        core.set_completion_notifier(Arc::new(notifier));
        core
    }

    pub fn set_completion_notifier(&self, notifier: Arc<dyn CompletionNotifier>) {
        *self.notifier.lock().unwrap_or_else(PoisonError::into_inner) = Some(notifier);
    }

    /// Register a surface; it is rendered immediately with the current view
    pub fn add_render_surface(&self, surface: Arc<dyn RenderSurface>) {
        surface.render(&self.view());
        self.surfaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(surface);
    }

    /// Subscribe to view updates
    pub fn subscribe(&self) -> watch::Receiver<TimerView> {
        self.view_tx.subscribe()
    }

    pub fn view(&self) -> TimerView {
        self.lock().state.view()
    }

    pub fn state(&self) -> TimerState {
        self.lock().state.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply an update and notify observers if the visible state changed
    fn update<R>(&self, updater: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.lock();
        let before = inner.state.view();

        let result = updater(&mut inner);

        let after = inner.state.view();
        if after == before {
            return result;
        }

        // Published and queued under the lock so observers see changes in order
        if let Err(e) = self.view_tx.send(after.clone()) {
            warn!("Failed to send timer view update: {}", e);
        }
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(after);
        drop(inner);

        self.dispatch();
        result
    }

    /// Render queued views in order, unless another thread already is
    fn dispatch(&self) {
        loop {
            let guard = match self.dispatching.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(e)) => e.into_inner(),
                Err(TryLockError::WouldBlock) => return,
            };

            while let Some(view) = self.next_pending() {
                let surfaces = self
                    .surfaces
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone();
                for surface in surfaces {
                    surface.render(&view);
                }
            }
            drop(guard);

            // A view queued between the last pop and releasing the guard
            // would otherwise be stranded
            if self.pending.lock().unwrap_or_else(PoisonError::into_inner).is_empty() {
                return;
            }
        }
    }

    fn next_pending(&self) -> Option<TimerView> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    /// Set all three duration fields.
    ///
    /// Ignored while running. A value outside its field's range leaves that
    /// field untouched. Observers only hear about fields that changed.
    pub fn set_duration(&self, hours: u64, minutes: u64, seconds: u64) -> bool {
        self.update(|inner| {
            if inner.state.is_running {
                debug!("Duration fields are locked while the timer runs");
                return false;
            }

            for (field, value) in TimeField::ALL.into_iter().zip([hours, minutes, seconds]) {
                write_field(&mut inner.state, field, value);
            }
            inner.state.is_ready = inner.state.is_ready_to_play();
            true
        })
    }

    /// Set a single duration field, leaving the other two alone
    pub fn set_field(&self, field: TimeField, value: u64) -> bool {
        self.update(|inner| {
            if inner.state.is_running {
                debug!("Duration fields are locked while the timer runs");
                return false;
            }

            write_field(&mut inner.state, field, value);
            inner.state.is_ready = inner.state.is_ready_to_play();
            true
        })
    }

    /// Handle raw text typed into a duration field
    pub fn enter_text(&self, field: TimeField, text: &str) -> InputOutcome {
        if self.lock().state.is_running {
            return InputOutcome::Locked;
        }

        match validate_time_input(text, field.range()) {
            Some(value) => {
                if self.set_field(field, value) {
                    InputOutcome::Accepted(value)
                } else {
                    // Started between the check above and the update
                    InputOutcome::Locked
                }
            }
            None => {
                debug!("Rejected {} input: {:?}", field, text);
                InputOutcome::Rejected
            }
        }
    }

    /// Start or pause the countdown.
    ///
    /// Starting spawns the countdown loop onto the current tokio runtime
    /// unless a loop from this run is still suspended, in which case that
    /// loop simply carries on after its current tick.
    pub fn toggle_run(self: &Arc<Self>) -> ToggleOutcome {
        let (outcome, spawn_epoch) = self.update(|inner| {
            if inner.state.is_running {
                inner.state.is_running = false;
                return (ToggleOutcome::Paused, None);
            }
            if !inner.state.is_ready {
                return (ToggleOutcome::NotReady, None);
            }

            inner.state.is_running = true;
            if inner.loop_active {
                (ToggleOutcome::Started, None)
            } else {
                inner.loop_active = true;
                (ToggleOutcome::Started, Some(inner.epoch))
            }
        });

        match outcome {
            ToggleOutcome::Started => info!("Timer started"),
            ToggleOutcome::Paused => info!("Timer paused"),
            ToggleOutcome::NotReady => debug!("Start ignored, no time selected"),
        }

        if let Some(epoch) = spawn_epoch {
            tokio::spawn(countdown_task(Arc::clone(self), epoch));
        }

        outcome
    }

    /// Zero everything and stop. Never fires the completion notifier.
    pub fn restart(&self) {
        self.update(|inner| {
            inner.state.restart();
            inner.epoch += 1;
            inner.loop_active = false;
        });
        info!("Timer restarted");
    }

    /// Stop any running countdown without touching the fields
    pub fn shutdown(&self) {
        self.update(|inner| {
            inner.state.is_running = false;
            inner.epoch += 1;
            inner.loop_active = false;
        });
        debug!("Timer core shut down");
    }

    /// Flip the sound preference and return the new value
    pub fn toggle_sound(&self) -> bool {
        let enabled = self.update(|inner| {
            inner.state.is_sound_enabled = !inner.state.is_sound_enabled;
            inner.state.is_sound_enabled
        });
        info!("Sound {}", if enabled { "on" } else { "off" });
        enabled
    }

    pub fn set_sound_enabled(&self, enabled: bool) {
        self.update(|inner| inner.state.is_sound_enabled = enabled);
    }

    /// Top of a loop iteration: capture the baseline and refresh progress
    pub(crate) fn begin_tick(&self, epoch: u64) -> TickCheck {
        self.update(|inner| {
            if !inner.owns(epoch) {
                return TickCheck::Halted;
            }
            if !inner.state.is_running {
                inner.release(epoch);
                return TickCheck::Halted;
            }
            if inner.state.is_finished() {
                return TickCheck::Finished;
            }

            let millis = inner.state.remaining_millis();
            if inner.state.initial_millis == 0 {
                inner.state.initial_millis = millis;
                debug!("Captured baseline of {}ms", millis);
            }
            inner.state.progress = inner.state.progress_for(millis);
            TickCheck::Continue
        })
    }

    /// After the tick delay: take one second off if the run is still live
    pub(crate) fn finish_tick(&self, epoch: u64) -> bool {
        self.update(|inner| {
            if !inner.owns(epoch) {
                return false;
            }
            if !inner.state.is_running {
                inner.release(epoch);
                return false;
            }

            let remaining = inner
                .state
                .remaining_millis()
                .saturating_sub(MILLIS_PER_SECOND);
            inner.state.set_remaining_millis(remaining);
            debug!("Tick, {}ms remaining", remaining);
            true
        })
    }

    /// Zero reached while running: empty the progress ring
    pub(crate) fn mark_finished(&self, epoch: u64) -> bool {
        self.update(|inner| {
            if !inner.owns(epoch) {
                return false;
            }
            inner.state.progress = 0.0;
            true
        })
    }

    /// End of the grace delay: reset and tell the host, unless the run was
    /// restarted in the meantime
    pub(crate) fn complete(&self, epoch: u64) -> bool {
        let completed = self.update(|inner| {
            if !inner.owns(epoch) {
                return false;
            }
            inner.state.restart();
            inner.epoch += 1;
            inner.loop_active = false;
            true
        });

        if completed {
            info!("Timer finished");
            let notifier = self
                .notifier
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            if let Some(notifier) = notifier {
                notifier.on_finish();
            }
        }

        completed
    }
}

/// Store one field if the value is within its range
fn write_field(state: &mut TimerState, field: TimeField, value: u64) {
    if !field.range().contains(value) {
        debug!("Ignoring out of range {} value: {}", field, value);
        return;
    }
    match field {
        TimeField::Hours => state.hours = value,
        TimeField::Minutes => state.minutes = value,
        TimeField::Seconds => state.seconds = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSurface(Mutex<Vec<TimerView>>);

    impl RenderSurface for CountingSurface {
        fn render(&self, view: &TimerView) {
            self.0.lock().unwrap().push(view.clone());
        }
    }

    #[test]
    fn test_set_duration_recomputes_ready() {
        let core = TimerCore::new();
        assert!(!core.view().is_ready);

        core.set_duration(0, 0, 5);
        assert!(core.view().is_ready);
        assert_eq!(core.state().remaining_millis(), 5_000);

        core.set_duration(0, 0, 0);
        assert!(!core.view().is_ready);
    }

    #[test]
    fn test_out_of_range_field_keeps_previous_value() {
        let core = TimerCore::new();
        core.set_duration(2, 30, 15);
        core.set_duration(24, 45, 60);

        let view = core.view();
        assert_eq!((view.hours, view.minutes, view.seconds), (2, 45, 15));
    }

    #[test]
    fn test_identical_values_do_not_notify() {
        let core = TimerCore::new();
        let surface = Arc::new(CountingSurface::default());
        core.add_render_surface(surface.clone());
        // Initial render on registration
        assert_eq!(surface.0.lock().unwrap().len(), 1);

        core.set_duration(0, 1, 0);
        core.set_duration(0, 1, 0);
        core.set_field(TimeField::Minutes, 1);

        assert_eq!(surface.0.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_enter_text_validates_per_field() {
        let core = TimerCore::new();
        assert_eq!(core.enter_text(TimeField::Minutes, "005"), InputOutcome::Accepted(5));
        assert_eq!(core.enter_text(TimeField::Hours, "30"), InputOutcome::Accepted(3));
        assert_eq!(core.enter_text(TimeField::Seconds, "75"), InputOutcome::Rejected);
        assert_eq!(core.enter_text(TimeField::Seconds, "x"), InputOutcome::Accepted(0));

        let view = core.view();
        assert_eq!((view.hours, view.minutes, view.seconds), (3, 5, 0));
    }

    #[test]
    fn test_toggle_without_time_is_noop() {
        let core = TimerCore::new();
        let before = core.state();

        assert_eq!(core.toggle_run(), ToggleOutcome::NotReady);
        assert_eq!(core.state(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fields_locked_while_running() {
        let core = TimerCore::new();
        core.set_duration(0, 1, 0);
        assert_eq!(core.toggle_run(), ToggleOutcome::Started);

        assert!(!core.set_duration(0, 5, 0));
        assert_eq!(core.enter_text(TimeField::Minutes, "5"), InputOutcome::Locked);
        assert_eq!(core.view().minutes, 1);

        core.restart();
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_from_running() {
        let core = TimerCore::new();
        core.set_sound_enabled(false);
        core.set_duration(1, 2, 3);
        core.toggle_run();

        core.restart();

        let view = core.view();
        assert_eq!((view.hours, view.minutes, view.seconds), (0, 0, 0));
        assert!(!view.is_running);
        assert!(!view.is_ready);
        assert_eq!(view.progress, 0.0);
        assert!(!view.is_sound_enabled);
        assert_eq!(core.state().initial_millis, 0);
    }

    #[test]
    fn test_concurrent_field_edits_never_revert() {
        let core = TimerCore::new();
        let surface = Arc::new(CountingSurface::default());
        core.add_render_surface(surface.clone());

        let minutes_core = Arc::clone(&core);
        let minutes = std::thread::spawn(move || {
            for _ in 0..200 {
                for value in 1..=59 {
                    minutes_core.set_field(TimeField::Minutes, value);
                }
                minutes_core.set_field(TimeField::Minutes, 0);
            }
        });
        let seconds_core = Arc::clone(&core);
        let seconds = std::thread::spawn(move || {
            for i in 0..20_000u64 {
                seconds_core.set_field(TimeField::Seconds, 1 + i % 2);
            }
        });
        minutes.join().unwrap();
        seconds.join().unwrap();

        // Minutes only ever climb within a pass, then drop straight to 0
        let views = surface.0.lock().unwrap();
        let reverts = views
            .windows(2)
            .filter(|w| w[1].minutes < w[0].minutes && w[1].minutes != 0)
            .count();
        assert_eq!(reverts, 0);
        assert_eq!(core.view().minutes, 0);
    }

    #[test]
    fn test_surface_may_call_back_into_core() {
        struct Muting(Arc<TimerCore>);

        impl RenderSurface for Muting {
            fn render(&self, view: &TimerView) {
                if view.seconds == 5 {
                    self.0.set_sound_enabled(false);
                }
            }
        }

        let core = TimerCore::new();
        let recorder = Arc::new(CountingSurface::default());
        core.add_render_surface(Arc::new(Muting(Arc::clone(&core))));
        core.add_render_surface(recorder.clone());

        core.set_duration(0, 0, 5);

        assert!(!core.view().is_sound_enabled);
        let views = recorder.0.lock().unwrap();
        let sound: Vec<bool> = views.iter().map(|v| v.is_sound_enabled).collect();
        assert_eq!(sound, vec![true, true, false]);
    }

    #[test]
    fn test_toggle_sound() {
        let core = TimerCore::new();
        let rx = core.subscribe();
        assert!(rx.borrow().is_sound_enabled);

        assert!(!core.toggle_sound());
        assert!(!rx.borrow().is_sound_enabled);
        assert!(core.toggle_sound());
    }
}
