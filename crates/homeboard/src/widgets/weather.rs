//! Weather widget for a single saved city.

use std::future::Future;

use board_feeds::{FeedError, WeatherClient, WeatherReport};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use tracing::{info, warn};

use super::{RenderContext, Widget};
use crate::store::{DashboardStore, StoreError};

/// Shown after a failed lookup.
pub const CITY_NOT_FOUND: &str = "Stadt konnte nicht gefunden werden.";

/// Anything that can fetch a forecast by city name.
pub trait WeatherSource {
    fn fetch_forecast(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<WeatherReport, FeedError>> + Send;
}

impl WeatherSource for WeatherClient {
    fn fetch_forecast(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<WeatherReport, FeedError>> + Send {
        self.forecast(city)
    }
}

/// Background mood derived from the condition text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Stormy,
    Cloudy,
    Clear,
}

impl Backdrop {
    /// Matches "storm" or "rain" first, then "cloud", ignoring case.
    pub fn for_condition(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("storm") || text.contains("rain") {
            Backdrop::Stormy
        } else if text.contains("cloud") {
            Backdrop::Cloudy
        } else {
            Backdrop::Clear
        }
    }

    fn color(self) -> Color {
        match self {
            Backdrop::Stormy => Color::Blue,
            Backdrop::Cloudy => Color::Gray,
            Backdrop::Clear => Color::Yellow,
        }
    }
}

/// Saved city, last report and last error.
pub struct WeatherController<S> {
    store: DashboardStore,
    source: S,
    city: Option<String>,
    report: Option<WeatherReport>,
    error: Option<String>,
}

impl<S: WeatherSource> WeatherController<S> {
    /// Restores the saved city. Nothing is fetched until [`refresh`](Self::refresh).
    pub fn load(store: DashboardStore, source: S) -> Result<Self, StoreError> {
        let city = store.load_city()?;
        Ok(Self {
            store,
            source,
            city,
            report: None,
            error: None,
        })
    }

    /// Saves `city` and fetches its forecast.
    ///
    /// Returns `false` without doing anything for a blank name.
    pub async fn submit(&mut self, city: &str) -> Result<bool, StoreError> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(false);
        }
        self.store.save_city(city)?;
        self.city = Some(city.to_string());
        self.error = None;
        self.refresh().await?;
        Ok(true)
    }

    /// Fetches the forecast for the saved city, if any.
    ///
    /// A failed fetch forgets the city, both here and in the store, and
    /// leaves [`CITY_NOT_FOUND`] as the error.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let Some(city) = self.city.as_deref() else {
            return Ok(());
        };
        match self.source.fetch_forecast(city).await {
            Ok(report) => {
                info!(city, temp_c = report.current.temp_c, "weather fetched");
                self.report = Some(report);
                self.error = None;
            }
            Err(e) => {
                warn!(city, error = %e, "weather fetch failed");
                self.city = None;
                self.report = None;
                self.error = Some(CITY_NOT_FOUND.to_string());
                self.store.clear_city()?;
            }
        }
        Ok(())
    }

    /// Forgets the city, report and error.
    pub fn remove(&mut self) -> Result<(), StoreError> {
        self.city = None;
        self.report = None;
        self.error = None;
        self.store.clear_city()
    }
}

impl<S> WeatherController<S> {
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Backdrop for the current report, if there is one.
    pub fn backdrop(&self) -> Option<Backdrop> {
        self.report
            .as_ref()
            .map(|r| Backdrop::for_condition(&r.current.condition.text))
    }
}

impl<S> Widget for WeatherController<S> {
    fn id(&self) -> &'static str {
        "weather"
    }

    fn title(&self) -> &'static str {
        "Wetter"
    }

    fn render(&self, ctx: &RenderContext) -> Text<'static> {
        let dim = Style::default().fg(Color::DarkGray);
        let Some(report) = &self.report else {
            let mut lines = Vec::new();
            if let Some(error) = &self.error {
                lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red)));
            }
            let prompt = match &self.city {
                Some(city) => format!("Lade Wetter für {city}..."),
                None => "Stadt eingeben".to_string(),
            };
            lines.push(Line::styled(prompt, dim));
            return Text::from(lines);
        };

        let backdrop = Backdrop::for_condition(&report.current.condition.text);
        let temp = Line::styled(
            format!("{:.0}°C", report.current.temp_c),
            Style::default()
                .fg(backdrop.color())
                .add_modifier(Modifier::BOLD),
        );
        if ctx.is_compact() {
            return Text::from(vec![Line::from(report.location.name.clone()), temp]);
        }

        let mut lines = vec![
            Line::styled(
                report.location.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            temp,
            Line::from(report.current.condition.text.clone()),
        ];
        if let Some(today) = report.today() {
            lines.push(Line::from(vec![
                Span::styled("Min/Max: ", dim),
                Span::raw(format!("{:.0}°C / {:.0}°C", today.mintemp_c, today.maxtemp_c)),
            ]));
        }
        Text::from(lines)
    }
}
