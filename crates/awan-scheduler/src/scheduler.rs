//! The polling scheduler loop.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info};

use crate::{
    Clock, Producer, Publisher, RetryExecutor, RunTracker, ScheduleTable, Slot, WallTime,
};

/// Default pause between schedule scans.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// The scheduler driver.
///
/// Polls the clock on a fixed interval and, for each slot whose target
/// time equals the current minute and which has not yet completed today,
/// runs one produce -> publish firing to completion before moving on.
///
/// Firings block the loop: a slot stuck in retry delays every
/// later-ordered slot. The run tracker resets itself by comparison
/// against the current date; nothing is cleared at midnight.
pub struct SchedulerLoop<C: Clock> {
    clock: C,
    schedule: ScheduleTable,
    tracker: RunTracker,
    executor: RetryExecutor,
    poll_interval: Duration,
}

impl<C: Clock> SchedulerLoop<C> {
    pub fn new(clock: C, schedule: ScheduleTable, executor: RetryExecutor) -> Self {
        Self {
            clock,
            schedule,
            tracker: RunTracker::new(),
            executor,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the pause between scans.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run until the shutdown channel flips to `true`.
    ///
    /// There is no other exit: absent a shutdown signal the loop runs
    /// until the process is killed.
    pub async fn run(
        &mut self,
        mut shutdown_rx: watch::Receiver<bool>,
        producer: Producer,
        publisher: Publisher,
    ) {
        info!(slots = self.schedule.len(), "scheduler starting");

        loop {
            if *shutdown_rx.borrow() {
                info!("scheduler shutting down");
                break;
            }

            self.tick(&producer, &publisher).await;

            tokio::select! {
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("scheduler received shutdown signal");
                    }
                }
                _ = sleep(self.poll_interval) => {}
            }
        }

        info!("scheduler shut down gracefully");
    }

    /// One scan: sample the clock once, then fire every due slot in table
    /// order. The run date recorded for a firing is the scan's date, even
    /// if the retry cycle ran past midnight.
    pub async fn tick(&mut self, producer: &Producer, publisher: &Publisher) {
        let now = self.clock.now();
        let due: Vec<Slot> = due_slots(&self.schedule, &self.tracker, now)
            .into_iter()
            .cloned()
            .collect();

        for slot in due {
            info!(
                label = %slot.label,
                hour = slot.hour,
                minute = slot.minute,
                "slot due, firing"
            );
            match self.executor.execute(&slot.label, producer, publisher).await {
                Ok(()) => {
                    self.tracker.mark_run(&slot.label, now.date);
                    info!(label = %slot.label, date = %now.date, "firing complete");
                }
                Err(e) => {
                    // Only reachable under a bounded policy; the slot stays
                    // unmarked and fires again when it next matches.
                    error!(label = %slot.label, error = %e, "firing abandoned");
                }
            }
        }
    }

    pub fn tracker(&self) -> &RunTracker {
        &self.tracker
    }
}

/// Slots due at `now`: the target equals the current (hour, minute)
/// exactly, never "target has passed", and no completed firing is
/// recorded for today.
pub fn due_slots<'a>(
    schedule: &'a ScheduleTable,
    tracker: &RunTracker,
    now: WallTime,
) -> Vec<&'a Slot> {
    schedule
        .slots()
        .iter()
        .filter(|s| (s.hour, s.minute) == (now.hour, now.minute))
        .filter(|s| !tracker.has_run_today(&s.label, now.date))
        .collect()
}
