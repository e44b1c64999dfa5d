//! Timers shared by the controllers and the CLI.
//!
//! - [`Debouncer`] delays a write until input has been quiet for a while.
//! - [`Ticker`] drives once-a-second updates until told to stop.
//!
//! Both need a running Tokio runtime.

mod debounce;
mod ticker;

pub use debounce::Debouncer;
pub use ticker::{TickOutcome, Ticker, DEFAULT_TICK_RATE};
