//! # board-feeds
//!
//! Typed clients for the two public APIs the homeboard dashboard reads:
//!
//! - a forecast API (current conditions plus daily min/max by city)
//! - a stock quote API (current price and percent change by ticker)
//!
//! Configuration is passed in explicitly; nothing is read from the
//! environment here.
//!
//! ## Example
//!
//! ```rust,ignore
//! use board_feeds::{FinanceClient, FinanceConfig};
//!
//! let client = FinanceClient::new(FinanceConfig {
//!     api_key: "token".into(),
//!     ..FinanceConfig::default()
//! });
//! let quote = client.quote("AAPL").await?;
//! println!("{:.2} ({:+.2}%)", quote.current_price, quote.percent_change);
//! ```

mod client;
mod error;
mod types;

pub use client::{
    FinanceClient, FinanceConfig, WeatherClient, WeatherConfig, FINANCE_API_URL, WEATHER_API_URL,
};
pub use error::FeedError;
pub use types::{Condition, CurrentWeather, DayStats, Forecast, ForecastDay, Location, Quote, WeatherReport};
