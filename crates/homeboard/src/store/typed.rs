//! Typed persistence facade over a [`KeyValueStore`].
//!
//! Every persisted entity has one load/save pair here, so key names and
//! JSON encoding live in one place. Loaders return `Ok(None)` for absent
//! keys and [`StoreError::Corrupt`] for values that do not decode.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{KeyValueStore, StoreError};
use crate::layout::LayoutItem;
use crate::widgets::timer::Countdown;
use crate::widgets::todo::TodoItem;

/// Store key names.
pub mod keys {
    /// JSON array of layout rectangles.
    pub const LAYOUT: &str = "dashboardLayout";
    /// JSON array of to-do items.
    pub const TODOS: &str = "todos";
    /// JSON array of countdowns.
    pub const COUNTDOWNS: &str = "countdowns";
    /// Stopwatch elapsed seconds as a decimal string.
    pub const STOPWATCH_TIME: &str = "stopwatchTime";
    /// Free-form note text.
    pub const NOTE: &str = "note";
    /// Comma-joined ticker symbols.
    pub const FINANCE_SYMBOLS: &str = "financeSymbols";
    /// Weather city name.
    pub const WEATHER_CITY: &str = "weatherCity";

    /// Every key the dashboard writes.
    pub const ALL: [&str; 7] = [
        LAYOUT,
        TODOS,
        COUNTDOWNS,
        STOPWATCH_TIME,
        NOTE,
        FINANCE_SYMBOLS,
        WEATHER_CITY,
    ];
}

/// Shared, cloneable handle to the dashboard's persisted state.
#[derive(Clone)]
pub struct DashboardStore {
    inner: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for DashboardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardStore").finish_non_exhaustive()
    }
}

impl DashboardStore {
    /// Wraps a store backend.
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            inner: Arc::new(backend),
        }
    }

    // -- layout --

    /// Loads the persisted layout.
    pub fn load_layout(&self) -> Result<Option<Vec<LayoutItem>>, StoreError> {
        self.load_json(keys::LAYOUT)
    }

    /// Persists the full layout.
    pub fn save_layout(&self, layout: &[LayoutItem]) -> Result<(), StoreError> {
        self.save_json(keys::LAYOUT, &layout)
    }

    // -- todos --

    /// Loads the to-do list.
    pub fn load_todos(&self) -> Result<Option<Vec<TodoItem>>, StoreError> {
        self.load_json(keys::TODOS)
    }

    /// Persists the to-do list.
    pub fn save_todos(&self, todos: &[TodoItem]) -> Result<(), StoreError> {
        self.save_json(keys::TODOS, &todos)
    }

    // -- countdowns & stopwatch --

    /// Loads the countdown list.
    pub fn load_countdowns(&self) -> Result<Option<Vec<Countdown>>, StoreError> {
        self.load_json(keys::COUNTDOWNS)
    }

    /// Persists the countdown list.
    pub fn save_countdowns(&self, countdowns: &[Countdown]) -> Result<(), StoreError> {
        self.save_json(keys::COUNTDOWNS, &countdowns)
    }

    /// Loads stopwatch elapsed seconds.
    pub fn load_stopwatch(&self) -> Result<Option<u64>, StoreError> {
        match self.inner.get(keys::STOPWATCH_TIME)? {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    key: keys::STOPWATCH_TIME,
                    message: e.to_string(),
                }),
        }
    }

    /// Persists stopwatch elapsed seconds.
    pub fn save_stopwatch(&self, seconds: u64) -> Result<(), StoreError> {
        self.inner.set(keys::STOPWATCH_TIME, &seconds.to_string())
    }

    // -- note --

    /// Loads the note text.
    pub fn load_note(&self) -> Result<Option<String>, StoreError> {
        self.inner.get(keys::NOTE)
    }

    /// Persists the note text.
    pub fn save_note(&self, note: &str) -> Result<(), StoreError> {
        self.inner.set(keys::NOTE, note)
    }

    // -- finance --

    /// Loads the watchlist. An absent or empty value is an empty list.
    pub fn load_symbols(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .inner
            .get(keys::FINANCE_SYMBOLS)?
            .filter(|raw| !raw.is_empty())
            .map(|raw| raw.split(',').map(str::to_string).collect())
            .unwrap_or_default())
    }

    /// Persists the watchlist comma-joined.
    pub fn save_symbols(&self, symbols: &[String]) -> Result<(), StoreError> {
        self.inner.set(keys::FINANCE_SYMBOLS, &symbols.join(","))
    }

    // -- weather --

    /// Loads the weather city. An empty value counts as unset.
    pub fn load_city(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .inner
            .get(keys::WEATHER_CITY)?
            .filter(|city| !city.is_empty()))
    }

    /// Persists the weather city.
    pub fn save_city(&self, city: &str) -> Result<(), StoreError> {
        self.inner.set(keys::WEATHER_CITY, city)
    }

    /// Removes the weather city.
    pub fn clear_city(&self) -> Result<(), StoreError> {
        self.inner.remove(keys::WEATHER_CITY)
    }

    // -- helpers --

    fn load_json<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, StoreError> {
        match self.inner.get(key)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    key,
                    message: e.to_string(),
                }),
        }
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|e| StoreError::Encode {
            key,
            message: e.to_string(),
        })?;
        self.inner.set(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store() -> (DashboardStore, MemoryStore) {
        let backend = MemoryStore::new();
        (DashboardStore::new(backend.clone()), backend)
    }

    #[test]
    fn test_key_names_are_stable() {
        assert_eq!(
            keys::ALL,
            [
                "dashboardLayout",
                "todos",
                "countdowns",
                "stopwatchTime",
                "note",
                "financeSymbols",
                "weatherCity"
            ]
        );
    }

    #[test]
    fn test_absent_keys_load_as_none_or_empty() {
        let (store, _) = store();
        assert!(store.load_layout().expect("layout").is_none());
        assert!(store.load_todos().expect("todos").is_none());
        assert!(store.load_countdowns().expect("countdowns").is_none());
        assert!(store.load_stopwatch().expect("stopwatch").is_none());
        assert!(store.load_note().expect("note").is_none());
        assert!(store.load_symbols().expect("symbols").is_empty());
        assert!(store.load_city().expect("city").is_none());
    }

    #[test]
    fn test_layout_round_trip() {
        let (store, _) = store();
        let layout = crate::layout::default_layout();
        store.save_layout(&layout).expect("save");
        assert_eq!(store.load_layout().expect("load"), Some(layout));
    }

    #[test]
    fn test_malformed_json_is_corrupt() {
        let (store, backend) = store();
        backend.set(keys::TODOS, "[{\"id\": 1,").expect("set");
        let err = store.load_todos().expect_err("should be corrupt");
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_stopwatch_is_stored_as_decimal_string() {
        let (store, backend) = store();
        store.save_stopwatch(3725).expect("save");
        assert_eq!(
            backend.get(keys::STOPWATCH_TIME).expect("get").as_deref(),
            Some("3725")
        );
        assert_eq!(store.load_stopwatch().expect("load"), Some(3725));
    }

    #[test]
    fn test_stopwatch_garbage_is_corrupt() {
        let (store, backend) = store();
        backend.set(keys::STOPWATCH_TIME, "NaN").expect("set");
        assert!(store.load_stopwatch().expect_err("corrupt").is_corrupt());
    }

    #[test]
    fn test_symbols_are_comma_joined() {
        let (store, backend) = store();
        store
            .save_symbols(&["AAPL".to_string(), "TSLA".to_string()])
            .expect("save");
        assert_eq!(
            backend.get(keys::FINANCE_SYMBOLS).expect("get").as_deref(),
            Some("AAPL,TSLA")
        );
        assert_eq!(store.load_symbols().expect("load"), vec!["AAPL", "TSLA"]);
    }

    #[test]
    fn test_empty_symbols_string_is_empty_list() {
        let (store, backend) = store();
        backend.set(keys::FINANCE_SYMBOLS, "").expect("set");
        assert!(store.load_symbols().expect("load").is_empty());
    }

    #[test]
    fn test_city_save_and_clear() {
        let (store, _) = store();
        store.save_city("Leipzig").expect("save");
        assert_eq!(store.load_city().expect("load").as_deref(), Some("Leipzig"));
        store.clear_city().expect("clear");
        assert!(store.load_city().expect("load").is_none());
    }
}
