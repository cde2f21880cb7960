//! Daily slot scheduler for Awan.
//!
//! This crate is the core of the daemon:
//! - A schedule table maps slot labels to target times of day
//! - A run tracker guarantees at most one firing per slot per calendar day
//! - A retry executor drives the produce -> publish cycle until it succeeds
//! - The scheduler loop polls the clock and fires due slots in order
//!
//! The collaborators that fetch and publish content are injected as boxed
//! async closures, so this crate has no network dependencies.

mod clock;
mod error;
mod retry;
mod schedule;
mod scheduler;
mod tracker;

pub use clock::{Clock, SystemClock, WallTime};
pub use error::SchedulerError;
pub use retry::{Producer, Publisher, RetryExecutor, RetryPolicy};
pub use schedule::{ScheduleTable, Slot};
pub use scheduler::{DEFAULT_POLL_INTERVAL, SchedulerLoop, due_slots};
pub use tracker::RunTracker;
