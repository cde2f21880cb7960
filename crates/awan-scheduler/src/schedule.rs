//! The schedule table: slot labels mapped to target times of day.

use crate::SchedulerError;

/// A configured daily firing point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Unique label identifying the slot.
    pub label: String,
    /// Target hour, 24-hour clock.
    pub hour: u32,
    /// Target minute.
    pub minute: u32,
}

/// Immutable table of slots, built once at startup.
///
/// Slots are scanned in construction order on every tick, so the firing
/// order within a tick is deterministic.
#[derive(Debug, Clone)]
pub struct ScheduleTable {
    slots: Vec<Slot>,
}

impl ScheduleTable {
    /// Build a table from `(label, "HH:MM")` pairs.
    ///
    /// Fails on the first malformed time string or duplicate label; the
    /// process must not reach the loop with a bad schedule.
    pub fn parse<I, L, T>(entries: I) -> Result<Self, SchedulerError>
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: AsRef<str>,
    {
        let mut slots: Vec<Slot> = Vec::new();
        for (label, time) in entries {
            let label = label.into();
            let (hour, minute) =
                parse_time(time.as_ref()).ok_or_else(|| SchedulerError::InvalidTime {
                    label: label.clone(),
                    value: time.as_ref().to_string(),
                })?;
            if slots.iter().any(|s| s.label == label) {
                return Err(SchedulerError::DuplicateSlot(label));
            }
            slots.push(Slot {
                label,
                hour,
                minute,
            });
        }
        Ok(Self { slots })
    }

    /// Slots in construction order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Parse an `HH:MM` time-of-day string. Hours 0-23, minutes 0-59; a
/// single-digit hour is accepted.
fn parse_time(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.split_once(':')?;
    if h.is_empty() || !h.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if m.len() != 2 || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    (hour <= 23 && minute <= 59).then_some((hour, minute))
}
