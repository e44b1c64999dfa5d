//! Countdowns to named local date-times.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{timestamp_id, Clock};
use crate::store::{DashboardStore, StoreError};

/// Storage format of [`Countdown::target_date`] (local time, no offset).
pub const TARGET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A named countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    /// Creation timestamp in milliseconds; unique within the list.
    pub id: i64,
    /// Target as `YYYY-MM-DDTHH:MM:SS` local time.
    #[serde(rename = "targetDate")]
    pub target_date: String,
    /// Display name.
    pub name: String,
}

impl Countdown {
    /// Parsed target, or `None` if the stored string is malformed.
    pub fn target(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.target_date, TARGET_FORMAT).ok()
    }

    /// State of this countdown at local time `now`.
    ///
    /// A malformed target counts as expired.
    pub fn status(&self, now: NaiveDateTime) -> CountdownStatus {
        match self.target() {
            Some(target) => CountdownStatus::at(target - now),
            None => CountdownStatus::Expired,
        }
    }
}

/// Builds the stored target string from date (`YYYY-MM-DD`) and time
/// (`HH:MM`) inputs.
pub fn target_from_inputs(date: &str, time: &str) -> String {
    format!("{}T{}:00", date.trim(), time.trim())
}

/// Pending or expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    /// Target still ahead.
    Pending(Remaining),
    /// Target reached or passed; ticking stops.
    Expired,
}

impl CountdownStatus {
    /// Status for `remaining` time until the target.
    pub fn at(remaining: TimeDelta) -> Self {
        if remaining <= TimeDelta::zero() {
            return CountdownStatus::Expired;
        }
        // Sub-second remainders render as zero but stay pending.
        let total = remaining.num_seconds();
        CountdownStatus::Pending(Remaining {
            days: total / 86_400,
            hours: ((total % 86_400) / 3_600) as u32,
            minutes: ((total % 3_600) / 60) as u32,
            seconds: (total % 60) as u32,
        })
    }

    /// Returns `true` for [`CountdownStatus::Expired`].
    pub fn is_expired(&self) -> bool {
        matches!(self, CountdownStatus::Expired)
    }
}

impl fmt::Display for CountdownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownStatus::Pending(r) => write!(
                f,
                "{:02}d {:02}h {:02}m {:02}s",
                r.days, r.hours, r.minutes, r.seconds
            ),
            CountdownStatus::Expired => f.write_str("00:00:00:00"),
        }
    }
}

/// Time left, split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    /// Whole days.
    pub days: i64,
    /// Hours past the whole days (0-23).
    pub hours: u32,
    /// Minutes past the whole hours (0-59).
    pub minutes: u32,
    /// Seconds past the whole minutes (0-59).
    pub seconds: u32,
}

/// Owns the countdown list and a browsing cursor.
pub struct CountdownController {
    store: DashboardStore,
    clock: Arc<dyn Clock>,
    countdowns: Vec<Countdown>,
    cursor: usize,
}

impl CountdownController {
    /// Loads countdowns from the store. A corrupt list starts empty.
    pub fn load(store: DashboardStore, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let countdowns = match store.load_countdowns() {
            Ok(list) => list.unwrap_or_default(),
            Err(e) if e.is_corrupt() => {
                warn!(error = %e, "stored countdowns are corrupt, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            store,
            clock,
            countdowns,
            cursor: 0,
        })
    }

    /// Adds a countdown to `date` (`YYYY-MM-DD`) at `time` (`HH:MM`).
    ///
    /// Returns the new id, or `None` when the name is blank, the inputs do
    /// not form a valid date-time, or the target is not in the future.
    pub fn add(&mut self, name: &str, date: &str, time: &str) -> Result<Option<i64>, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let target_date = target_from_inputs(date, time);
        let Ok(target) = NaiveDateTime::parse_from_str(&target_date, TARGET_FORMAT) else {
            debug!(target_date, "countdown target does not parse");
            return Ok(None);
        };
        let now = self.clock.now();
        if target <= now.naive_local() {
            debug!(target_date, "countdown target is not in the future");
            return Ok(None);
        }

        let id = timestamp_id(now, self.countdowns.iter().map(|c| c.id));
        self.countdowns.push(Countdown {
            id,
            target_date,
            name: name.to_string(),
        });
        self.save()?;
        Ok(Some(id))
    }

    /// Removes `id` and moves the cursor back to the first entry.
    pub fn remove(&mut self, id: i64) -> Result<bool, StoreError> {
        let before = self.countdowns.len();
        self.countdowns.retain(|c| c.id != id);
        if self.countdowns.len() == before {
            return Ok(false);
        }
        self.cursor = 0;
        self.save()?;
        Ok(true)
    }

    /// Moves the cursor forward, wrapping. No-op when empty.
    pub fn next(&mut self) {
        if self.countdowns.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.countdowns.len();
    }

    /// Moves the cursor back, wrapping. No-op when empty.
    pub fn previous(&mut self) {
        if self.countdowns.is_empty() {
            return;
        }
        let len = self.countdowns.len();
        self.cursor = (self.cursor + len - 1) % len;
    }

    /// Countdown under the cursor.
    pub fn current(&self) -> Option<&Countdown> {
        self.countdowns.get(self.cursor)
    }

    /// Cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All countdowns in insertion order.
    pub fn countdowns(&self) -> &[Countdown] {
        &self.countdowns
    }

    /// Status of the current countdown right now.
    pub fn current_status(&self) -> Option<CountdownStatus> {
        let now = self.clock.now().naive_local();
        self.current().map(|c| c.status(now))
    }

    fn save(&self) -> Result<(), StoreError> {
        self.store.save_countdowns(&self.countdowns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::{keys, KeyValueStore, MemoryStore};
    use crate::widgets::test_support::noon;

    fn controller() -> (CountdownController, MemoryStore, Arc<FixedClock>) {
        let backend = MemoryStore::new();
        let clock = Arc::new(FixedClock::new(noon()));
        let ctl = CountdownController::load(DashboardStore::new(backend.clone()), clock.clone())
            .expect("load");
        (ctl, backend, clock)
    }

    #[test]
    fn test_past_target_is_rejected() {
        let (mut ctl, backend, _) = controller();
        assert_eq!(ctl.add("Gestern", "2026-03-13", "12:00").expect("add"), None);
        assert!(ctl.countdowns().is_empty());
        assert!(backend.get(keys::COUNTDOWNS).expect("get").is_none());
    }

    #[test]
    fn test_target_equal_to_now_is_rejected() {
        let (mut ctl, _, _) = controller();
        assert_eq!(ctl.add("Jetzt", "2026-03-14", "12:00").expect("add"), None);
    }

    #[test]
    fn test_future_target_is_added_with_exact_iso_string() {
        let (mut ctl, _, _) = controller();
        let id = ctl
            .add("New Year", "2027-01-01", "00:00")
            .expect("add")
            .expect("added");
        assert_eq!(ctl.countdowns().len(), 1);
        let added = &ctl.countdowns()[0];
        assert_eq!(added.id, id);
        assert_eq!(added.name, "New Year");
        assert_eq!(added.target_date, "2027-01-01T00:00:00");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let (mut ctl, _, _) = controller();
        assert_eq!(ctl.add("   ", "2027-01-01", "00:00").expect("add"), None);
    }

    #[test]
    fn test_unparseable_inputs_are_rejected() {
        let (mut ctl, _, _) = controller();
        assert_eq!(ctl.add("x", "2027-13-01", "00:00").expect("add"), None);
        assert_eq!(ctl.add("x", "2027-01-01", "25:00").expect("add"), None);
        assert_eq!(ctl.add("x", "soon", "").expect("add"), None);
    }

    #[test]
    fn test_add_persists_stored_shape() {
        let (mut ctl, backend, _) = controller();
        ctl.add(" Urlaub ", "2026-08-01", "08:30").expect("add");
        let raw = backend.get(keys::COUNTDOWNS).expect("get").expect("saved");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(
            value,
            serde_json::json!([{
                "id": noon().timestamp_millis(),
                "targetDate": "2026-08-01T08:30:00",
                "name": "Urlaub"
            }])
        );
    }

    #[test]
    fn test_navigation_wraps() {
        let (mut ctl, _, _) = controller();
        for name in ["a", "b", "c"] {
            ctl.add(name, "2027-01-01", "00:00").expect("add");
        }
        assert_eq!(ctl.cursor(), 0);
        ctl.previous();
        assert_eq!(ctl.cursor(), 2);
        ctl.next();
        assert_eq!(ctl.cursor(), 0);
        ctl.next();
        ctl.next();
        ctl.next();
        assert_eq!(ctl.cursor(), 0);
        assert_eq!(ctl.current().map(|c| c.name.as_str()), Some("a"));
    }

    #[test]
    fn test_navigation_on_empty_list_is_noop() {
        let (mut ctl, _, _) = controller();
        ctl.next();
        ctl.previous();
        assert_eq!(ctl.cursor(), 0);
        assert!(ctl.current().is_none());
        assert!(ctl.current_status().is_none());
    }

    #[test]
    fn test_remove_resets_cursor() {
        let (mut ctl, _, _) = controller();
        let a = ctl.add("a", "2027-01-01", "00:00").expect("add").expect("added");
        ctl.add("b", "2027-01-01", "00:00").expect("add");
        ctl.add("c", "2027-01-01", "00:00").expect("add");
        ctl.next();
        ctl.next();
        assert!(ctl.remove(a).expect("remove"));
        assert_eq!(ctl.cursor(), 0);
        assert_eq!(ctl.countdowns().len(), 2);
        assert!(!ctl.remove(a).expect("second remove"));
    }

    #[test]
    fn test_status_counts_down_then_expires() {
        let (mut ctl, _, clock) = controller();
        ctl.add("Mittag", "2026-03-15", "13:01").expect("add");

        let status = ctl.current_status().expect("current");
        assert_eq!(
            status,
            CountdownStatus::Pending(Remaining {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 0
            })
        );
        assert_eq!(status.to_string(), "01d 01h 01m 00s");

        clock.advance(chrono::Duration::days(2));
        let status = ctl.current_status().expect("current");
        assert!(status.is_expired());
        assert_eq!(status.to_string(), "00:00:00:00");
    }

    #[test]
    fn test_status_at_boundaries() {
        assert!(CountdownStatus::at(TimeDelta::zero()).is_expired());
        assert!(CountdownStatus::at(TimeDelta::milliseconds(-5)).is_expired());
        let last_second = CountdownStatus::at(TimeDelta::milliseconds(900));
        assert!(!last_second.is_expired());
        assert_eq!(last_second.to_string(), "00d 00h 00m 00s");
        assert!(!CountdownStatus::at(TimeDelta::milliseconds(1)).is_expired());
        assert_eq!(
            CountdownStatus::at(TimeDelta::seconds(59)).to_string(),
            "00d 00h 00m 59s"
        );
    }

    #[test]
    fn test_malformed_stored_target_counts_as_expired() {
        let countdown = Countdown {
            id: 1,
            target_date: "tomorrow".to_string(),
            name: "x".to_string(),
        };
        assert!(countdown.status(noon().naive_local()).is_expired());
    }

    #[test]
    fn test_reload_restores_list() {
        let (mut ctl, backend, clock) = controller();
        ctl.add("a", "2027-01-01", "00:00").expect("add");
        let reloaded = CountdownController::load(DashboardStore::new(backend), clock).expect("load");
        assert_eq!(reloaded.countdowns(), ctl.countdowns());
    }
}
