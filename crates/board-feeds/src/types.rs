//! Type definitions for the weather and quote API responses.
//!
//! Only the fields the dashboard renders are declared; unknown fields in the
//! responses are ignored so upstream additions don't break decoding.

use serde::{Deserialize, Serialize};

/// Forecast response from the weather API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    /// Resolved location for the queried city.
    pub location: Location,

    /// Current conditions.
    pub current: CurrentWeather,

    /// Daily forecast, one entry per requested day.
    pub forecast: Forecast,
}

/// Location block of a [`WeatherReport`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    /// City name as resolved by the API (may differ from the query).
    pub name: String,
}

/// Current conditions block of a [`WeatherReport`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentWeather {
    /// Temperature in degrees Celsius.
    pub temp_c: f64,

    /// Localized condition description and icon.
    pub condition: Condition,
}

/// Weather condition text and icon URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    /// Localized description, e.g. `"Leichter Regen"`.
    pub text: String,

    /// Protocol-relative icon URL.
    #[serde(default)]
    pub icon: String,
}

/// Forecast block of a [`WeatherReport`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Forecast {
    /// Forecast days, today first.
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

/// A single forecast day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDay {
    /// Daily aggregate values.
    pub day: DayStats,
}

/// Daily temperature range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayStats {
    /// Minimum temperature in degrees Celsius.
    pub mintemp_c: f64,

    /// Maximum temperature in degrees Celsius.
    pub maxtemp_c: f64,
}

impl WeatherReport {
    /// Today's forecast, if the API returned at least one day.
    pub fn today(&self) -> Option<&DayStats> {
        self.forecast.forecastday.first().map(|d| &d.day)
    }
}

/// Quote response from the finance API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    /// Current price.
    #[serde(rename = "c")]
    pub current_price: f64,

    /// Change since previous close, in percent.
    ///
    /// The API sends `null` for unknown symbols; that decodes as `0.0`.
    #[serde(rename = "dp", default, deserialize_with = "null_as_zero")]
    pub percent_change: f64,
}

impl Quote {
    /// Returns `true` when the price moved up or stayed flat.
    pub fn is_gain(&self) -> bool {
        self.percent_change >= 0.0
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
