//! TOML configuration schema types for homeboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so any subset of the file is valid.
//!
//! Duration fields use human-readable strings (e.g. `"1s"`, `"750ms"`)
//! parsed by the `humantime` crate through the accessor methods.

use std::path::PathBuf;
use std::time::Duration;

use board_feeds::{FinanceConfig, WeatherConfig, FINANCE_API_URL, WEATHER_API_URL};
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::config::xdg;
use crate::layout::DEFAULT_VIEWPORT_WIDTH;

/// Overrides `weather.api_key` when set and non-empty.
pub const WEATHER_API_KEY_ENV: &str = "HOMEBOARD_WEATHER_API_KEY";

/// Overrides `finance.api_key` when set and non-empty.
pub const FINANCE_API_KEY_ENV: &str = "HOMEBOARD_FINANCE_API_KEY";

/// Largest forecast window the weather API serves.
const MAX_FORECAST_DAYS: u8 = 14;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub layout: LayoutConfig,
    pub weather: WeatherSettings,
    pub finance: FinanceSettings,
    pub notes: NotesConfig,
    pub timer: TimerConfig,
    pub log: LogConfig,
}

impl Config {
    /// Replaces API keys with values from the environment, if present.
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = non_empty_env(WEATHER_API_KEY_ENV) {
            tracing::debug!("weather API key taken from {WEATHER_API_KEY_ENV}");
            self.weather.api_key = key;
        }
        if let Some(key) = non_empty_env(FINANCE_API_KEY_ENV) {
            tracing::debug!("finance API key taken from {FINANCE_API_KEY_ENV}");
            self.finance.api_key = key;
        }
    }

    /// Checks values that parse as TOML but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.notes.save_delay()?;
        self.timer.tick_rate()?;
        if self.layout.viewport_width == 0 {
            return Err(ConfigError::InvalidValue {
                field: "layout.viewport_width",
                value: "0".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if !(1..=MAX_FORECAST_DAYS).contains(&self.weather.days) {
            return Err(ConfigError::InvalidValue {
                field: "weather.days",
                value: self.weather.days.to_string(),
                message: format!("must be between 1 and {MAX_FORECAST_DAYS}"),
            });
        }
        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|e| ConfigError::InvalidValue {
        field,
        value: value.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Where the widget store lives.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Store file path. Empty means `$XDG_DATA_HOME/homeboard/store.json`.
    /// A leading `~` is expanded.
    pub path: String,
}

impl StorageConfig {
    /// Resolved store path.
    pub fn resolved_path(&self) -> PathBuf {
        if self.path.trim().is_empty() {
            xdg::store_path()
        } else {
            xdg::expand_tilde(self.path.trim())
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Viewport width in pixels used to turn grid units into pixel sizes.
    pub viewport_width: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }
}

/// `[weather]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WeatherSettings {
    pub api_key: String,
    pub base_url: String,
    /// Forecast days requested (1-14).
    pub days: u8,
    /// Language code for condition texts.
    pub lang: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: WEATHER_API_URL.to_string(),
            days: 1,
            lang: "de".to_string(),
        }
    }
}

impl WeatherSettings {
    /// Client configuration for the weather feed.
    pub fn client_config(&self) -> WeatherConfig {
        WeatherConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            days: self.days,
            lang: self.lang.clone(),
        }
    }
}

/// `[finance]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FinanceSettings {
    pub api_key: String,
    pub base_url: String,
}

impl Default for FinanceSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: FINANCE_API_URL.to_string(),
        }
    }
}

impl FinanceSettings {
    /// Client configuration for the quote feed.
    pub fn client_config(&self) -> FinanceConfig {
        FinanceConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NotesConfig {
    /// Quiet period before an edit is written (default `"1s"`).
    pub save_delay: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            save_delay: "1s".to_string(),
        }
    }
}

impl NotesConfig {
    pub fn save_delay(&self) -> Result<Duration, ConfigError> {
        parse_duration("notes.save_delay", &self.save_delay)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimerConfig {
    /// Period of the stopwatch and countdown ticker (default `"1s"`).
    pub tick_rate: String,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_rate: "1s".to_string(),
        }
    }
}

impl TimerConfig {
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        parse_duration("timer.tick_rate", &self.tick_rate)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Verbosity used when `HOMEBOARD_LOG` is not set.
    pub level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Filter directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
