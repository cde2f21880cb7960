//! Per-slot record of the last day a firing completed.

use std::collections::HashMap;

use chrono::NaiveDate;

/// Tracks, per slot label, the last calendar date on which a firing
/// completed successfully.
///
/// An absent entry means the slot has never completed. There is no reset
/// sweep: a new day makes [`RunTracker::has_run_today`] false simply
/// because the stored date no longer equals the current one. State lives
/// in memory only and is lost on restart.
#[derive(Debug, Default)]
pub struct RunTracker {
    last_run: HashMap<String, NaiveDate>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff `label` already completed a firing on `today`.
    pub fn has_run_today(&self, label: &str, today: NaiveDate) -> bool {
        self.last_run.get(label) == Some(&today)
    }

    /// Record a completed firing for `label` on `today`.
    ///
    /// Called only after a full produce -> publish cycle has succeeded.
    /// Idempotent for the same date.
    pub fn mark_run(&mut self, label: &str, today: NaiveDate) {
        self.last_run.insert(label.to_string(), today);
    }
}
