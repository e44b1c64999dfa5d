//! Second-resolution stopwatch.

use tracing::warn;

use crate::store::{DashboardStore, StoreError};

/// Elapsed-seconds stopwatch that persists after every tick.
///
/// Only the elapsed count survives a restart; a reloaded stopwatch is
/// always stopped.
pub struct Stopwatch {
    store: DashboardStore,
    elapsed: u64,
    running: bool,
}

impl Stopwatch {
    /// Restores the elapsed count. A corrupt value restarts from zero.
    pub fn load(store: DashboardStore) -> Result<Self, StoreError> {
        let elapsed = match store.load_stopwatch() {
            Ok(elapsed) => elapsed.unwrap_or(0),
            Err(e) if e.is_corrupt() => {
                warn!(error = %e, "stored stopwatch time is corrupt, starting at zero");
                0
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            store,
            elapsed,
            running: false,
        })
    }

    /// Starts or pauses. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Stops and zeroes the stopwatch.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.running = false;
        self.elapsed = 0;
        self.store.save_stopwatch(0)
    }

    /// Advances one second if running. Returns whether it advanced.
    pub fn tick(&mut self) -> Result<bool, StoreError> {
        if !self.running {
            return Ok(false);
        }
        self.elapsed += 1;
        self.store.save_stopwatch(self.elapsed)?;
        Ok(true)
    }

    /// Elapsed seconds.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed time as `HH:MM:SS`.
    pub fn display(&self) -> String {
        format_hms(self.elapsed)
    }
}

/// Formats seconds as `HH:MM:SS`; hours keep growing past 99.
pub fn format_hms(total: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        total / 3_600,
        (total % 3_600) / 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{keys, KeyValueStore, MemoryStore};

    fn stopwatch() -> (Stopwatch, MemoryStore) {
        let backend = MemoryStore::new();
        let sw = Stopwatch::load(DashboardStore::new(backend.clone())).expect("load");
        (sw, backend)
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(61), "00:01:01");
        assert_eq!(format_hms(3_600), "01:00:00");
        assert_eq!(format_hms(359_999), "99:59:59");
        assert_eq!(format_hms(360_000), "100:00:00");
    }

    #[test]
    fn test_tick_only_advances_while_running() {
        let (mut sw, backend) = stopwatch();
        assert!(!sw.tick().expect("tick"));
        assert_eq!(sw.elapsed(), 0);
        assert!(backend.get(keys::STOPWATCH_TIME).expect("get").is_none());

        assert!(sw.toggle());
        for _ in 0..3 {
            assert!(sw.tick().expect("tick"));
        }
        assert_eq!(sw.elapsed(), 3);
        assert_eq!(
            backend.get(keys::STOPWATCH_TIME).expect("get").as_deref(),
            Some("3")
        );

        assert!(!sw.toggle());
        assert!(!sw.tick().expect("tick"));
        assert_eq!(sw.elapsed(), 3);
    }

    #[test]
    fn test_reset_stops_and_persists_zero() {
        let (mut sw, backend) = stopwatch();
        sw.toggle();
        sw.tick().expect("tick");
        sw.reset().expect("reset");
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed(), 0);
        assert_eq!(
            backend.get(keys::STOPWATCH_TIME).expect("get").as_deref(),
            Some("0")
        );
    }

    #[test]
    fn test_reload_restores_elapsed_but_not_running() {
        let backend = MemoryStore::new();
        backend.set(keys::STOPWATCH_TIME, "3725").expect("set");
        let sw = Stopwatch::load(DashboardStore::new(backend)).expect("load");
        assert_eq!(sw.elapsed(), 3_725);
        assert!(!sw.is_running());
        assert_eq!(sw.display(), "01:02:05");
    }

    #[test]
    fn test_corrupt_value_starts_at_zero() {
        let backend = MemoryStore::new();
        backend.set(keys::STOPWATCH_TIME, "NaN").expect("set");
        let sw = Stopwatch::load(DashboardStore::new(backend)).expect("load");
        assert_eq!(sw.elapsed(), 0);
    }
}
