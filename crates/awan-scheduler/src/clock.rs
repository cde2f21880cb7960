//! Wall-clock sampling at minute precision.

use chrono::{Local, NaiveDate, Timelike};

/// A wall-clock sample: time of day at minute precision plus the calendar
/// date, in the process-local timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    pub hour: u32,
    pub minute: u32,
    pub date: NaiveDate,
}

impl WallTime {
    pub fn new(hour: u32, minute: u32, date: NaiveDate) -> Self {
        Self { hour, minute, date }
    }
}

/// Source of the current wall-clock time.
///
/// Sampled fresh on every call. The loop reads it once per tick; tests
/// substitute a manual implementation to step through minutes and days.
pub trait Clock: Send + Sync {
    fn now(&self) -> WallTime;
}

/// The system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> WallTime {
        let now = Local::now();
        WallTime {
            hour: now.hour(),
            minute: now.minute(),
            date: now.date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_minute_precision() {
        let sample = SystemClock.now();
        assert!(sample.hour <= 23);
        assert!(sample.minute <= 59);
    }

    #[test]
    fn test_wall_time_equality() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(WallTime::new(8, 0, date), WallTime::new(8, 0, date));
        assert_ne!(WallTime::new(8, 0, date), WallTime::new(8, 1, date));
    }
}
