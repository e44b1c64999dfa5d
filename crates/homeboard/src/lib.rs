//! homeboard library
//!
//! A personal dashboard of five widgets (weather, stocks, to-dos, timers and
//! notes) laid out on a 12-column grid. Every widget keeps its state in a
//! shared key-value store so it survives restarts; layout changes are
//! persisted the same way.
//!
//! The `hb` binary drives everything from the command line. The weather and
//! stock feeds live in the `board-feeds` crate.

/// Wall-clock abstraction used for ids and countdowns.
pub mod clock;

/// Configuration utilities including XDG path resolution.
pub mod config;

/// The assembled dashboard.
pub mod dashboard;

/// Grid layout of the widgets.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// Debounce and tick timers.
pub mod schedule;

/// Persistent key-value storage.
pub mod store;

/// Widget controllers and rendering.
pub mod widgets;

pub use dashboard::{Dashboard, DashboardError};
