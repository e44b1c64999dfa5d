//! The assembled dashboard: layout plus every widget controller.

use std::sync::Arc;

use board_feeds::{FinanceClient, WeatherClient};
use chrono::{DateTime, Local};
use ratatui::text::Text;
use thiserror::Error;
use tracing::debug;

use crate::clock::Clock;
use crate::config::{Config, ConfigError};
use crate::layout::LayoutController;
use crate::store::{DashboardStore, StoreError};
use crate::widgets::finance::{FinanceController, QuoteSource};
use crate::widgets::notes::NotesController;
use crate::widgets::timer::TimerWidget;
use crate::widgets::todo::TodoController;
use crate::widgets::weather::{WeatherController, WeatherSource};
use crate::widgets::{RenderContext, Widget};

/// Errors from opening a dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One rendered widget.
#[derive(Debug, Clone)]
pub struct RenderedWidget {
    pub id: String,
    pub title: &'static str,
    pub body: Text<'static>,
}

/// Every controller over one shared store.
pub struct Dashboard<Q = FinanceClient, W = WeatherClient> {
    pub layout: LayoutController,
    pub todo: TodoController,
    pub timer: TimerWidget,
    pub finance: FinanceController<Q>,
    pub weather: WeatherController<W>,
    pub notes: NotesController,
    clock: Arc<dyn Clock>,
}

impl Dashboard {
    /// Opens the dashboard with HTTP feeds configured from `config`.
    pub fn open(
        store: DashboardStore,
        config: &Config,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DashboardError> {
        let quotes = FinanceClient::new(config.finance.client_config());
        let weather = WeatherClient::new(config.weather.client_config());
        Self::with_sources(store, config, clock, quotes, weather)
    }
}

impl<Q: QuoteSource, W: WeatherSource> Dashboard<Q, W> {
    /// Opens the dashboard with explicit feed sources.
    pub fn with_sources(
        store: DashboardStore,
        config: &Config,
        clock: Arc<dyn Clock>,
        quotes: Q,
        weather: W,
    ) -> Result<Self, DashboardError> {
        let dashboard = Self {
            layout: LayoutController::load(store.clone(), config.layout.viewport_width)?,
            todo: TodoController::load(store.clone(), Arc::clone(&clock))?,
            timer: TimerWidget::load(store.clone(), Arc::clone(&clock))?,
            finance: FinanceController::load(store.clone(), quotes)?,
            weather: WeatherController::load(store.clone(), weather)?,
            notes: NotesController::load(store, config.notes.save_delay()?)?,
            clock,
        };
        debug!(widgets = dashboard.layout.items().len(), "dashboard opened");
        Ok(dashboard)
    }

    /// Fetches fresh weather and quotes for the saved city and watchlist.
    pub async fn refresh_feeds(&mut self) -> Result<(), StoreError> {
        self.weather.refresh().await?;
        self.finance.refresh().await;
        Ok(())
    }
}

impl<Q, W> Dashboard<Q, W> {
    /// The widget registered under a layout id.
    pub fn widget(&self, id: &str) -> Option<&dyn Widget> {
        match id {
            "weather" => Some(&self.weather),
            "finance" => Some(&self.finance),
            "todo" => Some(&self.todo),
            "timer" => Some(&self.timer),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }

    /// Renders `id` at its layout size. `None` for ids not in the layout.
    pub fn render(&self, id: &str, now: DateTime<Local>) -> Option<RenderedWidget> {
        let size = self.layout.size_of(id)?;
        let widget = self.widget(id)?;
        Some(RenderedWidget {
            id: id.to_string(),
            title: widget.title(),
            body: widget.render(&RenderContext::new(size, now)),
        })
    }

    /// Renders every laid-out widget, top-to-bottom then left-to-right.
    pub fn render_all(&self) -> Vec<RenderedWidget> {
        let now = self.clock.now();
        let mut items: Vec<_> = self.layout.items().iter().collect();
        items.sort_by_key(|item| (item.y, item.x));
        items
            .into_iter()
            .filter_map(|item| self.render(&item.id, now))
            .collect()
    }
}

/// Flattens rendered text into newline-separated plain text.
pub fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
