//! HTTP clients for the weather and quote APIs.
//!
//! Each client is built from an explicit config value (API key, base URL and
//! query options). Requests are plain GETs; the body is read as text and then
//! decoded so decode failures are reported separately from network failures.
//! There is no timeout and no retry.

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::FeedError;
use crate::types::{Quote, WeatherReport};

/// Default forecast endpoint.
pub const WEATHER_API_URL: &str = "https://api.weatherapi.com/v1/forecast.json";

/// Default quote endpoint.
pub const FINANCE_API_URL: &str = "https://finnhub.io/api/v1/quote";

/// Settings for [`WeatherClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    /// API key sent as the `key` query parameter.
    pub api_key: String,
    /// Forecast endpoint.
    pub base_url: String,
    /// Number of forecast days to request.
    pub days: u8,
    /// Language for condition texts.
    pub lang: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: WEATHER_API_URL.to_string(),
            days: 1,
            lang: "de".to_string(),
        }
    }
}

/// Settings for [`FinanceClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceConfig {
    /// API token sent as the `token` query parameter.
    pub api_key: String,
    /// Quote endpoint.
    pub base_url: String,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: FINANCE_API_URL.to_string(),
        }
    }
}

/// Client for the forecast API.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherClient {
    /// Creates a client with its own connection pool.
    pub fn new(config: WeatherConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Creates a client that shares an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, config: WeatherConfig) -> Self {
        Self { http, config }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Builds the forecast URL for `city`.
    ///
    /// Query parameters are percent-encoded, so cities with spaces or
    /// umlauts are safe to pass as-is.
    pub fn forecast_url(&self, city: &str) -> Result<Url, FeedError> {
        if self.config.api_key.is_empty() {
            return Err(FeedError::MissingApiKey("weather"));
        }
        let days = self.config.days.to_string();
        Url::parse_with_params(
            &self.config.base_url,
            [
                ("q", city),
                ("days", days.as_str()),
                ("lang", self.config.lang.as_str()),
                ("key", self.config.api_key.as_str()),
            ],
        )
        .map_err(|e| FeedError::Url(e.to_string()))
    }

    /// Fetches the forecast for `city`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Status`] for non-2xx responses (the API answers
    /// 400 for unknown cities), [`FeedError::Network`] when no response
    /// arrives and [`FeedError::Decode`] for unexpected bodies.
    pub async fn forecast(&self, city: &str) -> Result<WeatherReport, FeedError> {
        let url = self.forecast_url(city)?;
        get_json(&self.http, url).await
    }
}

/// Client for the quote API.
#[derive(Debug, Clone)]
pub struct FinanceClient {
    http: reqwest::Client,
    config: FinanceConfig,
}

impl FinanceClient {
    /// Creates a client with its own connection pool.
    pub fn new(config: FinanceConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Creates a client that shares an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, config: FinanceConfig) -> Self {
        Self { http, config }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &FinanceConfig {
        &self.config
    }

    /// Builds the quote URL for `symbol`.
    pub fn quote_url(&self, symbol: &str) -> Result<Url, FeedError> {
        if self.config.api_key.is_empty() {
            return Err(FeedError::MissingApiKey("finance"));
        }
        Url::parse_with_params(
            &self.config.base_url,
            [("symbol", symbol), ("token", self.config.api_key.as_str())],
        )
        .map_err(|e| FeedError::Url(e.to_string()))
    }

    /// Fetches the latest quote for `symbol`.
    ///
    /// # Errors
    ///
    /// Same contract as [`WeatherClient::forecast`].
    pub async fn quote(&self, symbol: &str) -> Result<Quote, FeedError> {
        let url = self.quote_url(symbol)?;
        get_json(&self.http, url).await
    }
}

/// Sends a GET and decodes a 2xx JSON body.
async fn get_json<T: DeserializeOwned>(http: &reqwest::Client, url: Url) -> Result<T, FeedError> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| FeedError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FeedError::Network(e.to_string()))?;
    decode(&body)
}

/// Decodes a response body.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FeedError> {
    serde_json::from_str(body).map_err(|e| FeedError::Decode(e.to_string()))
}
