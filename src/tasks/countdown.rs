//! Countdown loop background task

use std::{sync::Arc, time::Duration};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::state::{timer_core::TickCheck, TimerCore};

/// Length of one tick, and of the grace delay after reaching zero
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Drive one run of the countdown until it is paused, restarted or finishes.
///
/// The running flag is checked both before and after each tick delay, so a
/// pause that lands mid-tick never gets a decrement applied after it.
pub async fn countdown_task(core: Arc<TimerCore>, epoch: u64) {
    debug!("Countdown loop started (epoch {})", epoch);

    loop {
        match core.begin_tick(epoch) {
            TickCheck::Continue => {}
            TickCheck::Finished => break,
            TickCheck::Halted => {
                debug!("Countdown loop halted (epoch {})", epoch);
                return;
            }
        }

        sleep(TICK_PERIOD).await;

        if !core.finish_tick(epoch) {
            debug!("Countdown loop stopped mid-tick (epoch {})", epoch);
            return;
        }
    }

    // Reached zero while still running
    if !core.mark_finished(epoch) {
        return;
    }
    info!("Countdown reached zero");

    sleep(TICK_PERIOD).await;

    if !core.complete(epoch) {
        debug!("Restarted during the grace delay, completion suppressed");
    }
}
