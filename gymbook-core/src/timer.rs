//! One-second interval timers for rest periods and workout duration.
//!
//! Timers run as tokio tasks and must be started from inside a runtime.
//! Dropping a [`TimerHandle`] cancels its timer.

use log::debug;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct TimerHandle {
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    pub fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Timer cancelled");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Waits for the timer to run out. Stopwatches never do.
    pub async fn wait(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Counts down from `seconds`, calling `on_tick` with the seconds left after
/// every tick. The last call receives 0.
pub fn countdown<F>(seconds: u64, mut on_tick: F) -> TimerHandle
where
    F: FnMut(u64) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut ticker = interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        let mut remaining = seconds;
        while remaining > 0 {
            ticker.tick().await;
            remaining -= 1;
            on_tick(remaining);
        }
        debug!("Countdown of {}s finished", seconds);
    });
    TimerHandle { task: Some(task) }
}

/// Counts up from zero, calling `on_tick` with the elapsed seconds until
/// cancelled.
pub fn stopwatch<F>(mut on_tick: F) -> TimerHandle
where
    F: FnMut(u64) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut ticker = interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        let mut elapsed = 0;
        loop {
            ticker.tick().await;
            elapsed += 1;
            on_tick(elapsed);
        }
    });
    TimerHandle { task: Some(task) }
}
