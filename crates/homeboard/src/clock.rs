//! Wall-clock access for controllers.
//!
//! Controllers that stamp ids or compare against "now" take a [`Clock`] so
//! tests can pin time with [`FixedClock`].

use std::collections::BTreeSet;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Local};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> DateTime<Local>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Local>>,
}

impl FixedClock {
    /// Creates a clock pinned at `now`.
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Local>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Millisecond timestamp id that does not collide with `existing`.
///
/// Normally the current time in milliseconds; if an existing id is at or
/// past it (two items created in the same millisecond, or a clock that went
/// backwards), one past the largest existing id. When the largest id is
/// `i64::MAX`, the first free id at or after the current time is used.
pub fn timestamp_id(now: DateTime<Local>, existing: impl IntoIterator<Item = i64>) -> i64 {
    let existing: BTreeSet<i64> = existing.into_iter().collect();
    let candidate = now.timestamp_millis();
    match existing.last() {
        Some(&max) if max >= candidate => max
            .checked_add(1)
            .unwrap_or_else(|| first_free_id(candidate, &existing)),
        _ => candidate,
    }
}

fn first_free_id(from: i64, existing: &BTreeSet<i64>) -> i64 {
    (from..=i64::MAX)
        .find(|id| !existing.contains(id))
        .unwrap_or(from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_fixed_clock_stays_put_until_advanced() {
        let clock = FixedClock::new(noon());
        assert_eq!(clock.now(), noon());
        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now(), noon() + Duration::seconds(90));
        clock.set(noon());
        assert_eq!(clock.now(), noon());
    }

    #[test]
    fn test_timestamp_id_uses_milliseconds() {
        let now = noon();
        assert_eq!(timestamp_id(now, []), now.timestamp_millis());
        assert_eq!(timestamp_id(now, [1, 2, 3]), now.timestamp_millis());
    }

    #[test]
    fn test_timestamp_id_bumps_past_collisions() {
        let now = noon();
        let ms = now.timestamp_millis();
        assert_eq!(timestamp_id(now, [ms]), ms + 1);
        assert_eq!(timestamp_id(now, [ms, ms + 1]), ms + 2);
        assert_eq!(timestamp_id(now, [ms + 500]), ms + 501);
    }

    #[test]
    fn test_timestamp_id_survives_max_stored_id() {
        let now = noon();
        let ms = now.timestamp_millis();
        assert_eq!(timestamp_id(now, [i64::MAX]), ms);
        assert_eq!(timestamp_id(now, [ms, i64::MAX]), ms + 1);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let a = SystemClock.now();
        let b = SystemClock.now();
        assert!(b >= a);
    }
}
