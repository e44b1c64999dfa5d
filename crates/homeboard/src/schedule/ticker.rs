use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tracing::debug;

/// Default tick period.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_secs(1);

/// Why [`Ticker::run`] returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome<B> {
    /// The shutdown future completed.
    Shutdown,
    /// The tick callback asked to stop.
    Stopped(B),
}

/// Fixed-rate tick loop.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Calls `on_tick` once per period until it breaks or `shutdown`
    /// completes, whichever happens first.
    ///
    /// The first call happens one full period after start.
    pub async fn run<B, F, S>(&self, shutdown: S, mut on_tick: F) -> TickOutcome<B>
    where
        F: FnMut() -> ControlFlow<B>,
        S: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.period);
        // The first tick completes immediately.
        interval.tick().await;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let ControlFlow::Break(value) = on_tick() {
                        debug!("ticker stopped by callback");
                        return TickOutcome::Stopped(value);
                    }
                }
                _ = &mut shutdown => {
                    debug!("ticker shutting down");
                    return TickOutcome::Shutdown;
                }
            }
        }
    }
}
