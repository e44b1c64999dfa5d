//! Stock watchlist widget.

use std::collections::HashMap;
use std::future::Future;

use board_feeds::{FeedError, FinanceClient, Quote};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use tracing::{debug, warn};

use super::{RenderContext, Widget};
use crate::store::{DashboardStore, StoreError};

/// Anything that can look up a quote by ticker symbol.
pub trait QuoteSource {
    fn fetch_quote(&self, symbol: &str) -> impl Future<Output = Result<Quote, FeedError>> + Send;
}

impl QuoteSource for FinanceClient {
    fn fetch_quote(&self, symbol: &str) -> impl Future<Output = Result<Quote, FeedError>> + Send {
        self.quote(symbol)
    }
}

/// Direction of the last carousel step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideDirection {
    Left,
    #[default]
    Right,
}

/// Watchlist, quote cache and carousel cursor.
///
/// The cache maps each symbol to its last quote; `None` records a failed
/// fetch so the widget can say so instead of spinning forever.
pub struct FinanceController<S> {
    store: DashboardStore,
    source: S,
    symbols: Vec<String>,
    quotes: HashMap<String, Option<Quote>>,
    cursor: usize,
    direction: SlideDirection,
}

impl<S: QuoteSource> FinanceController<S> {
    /// Loads the watchlist. Quotes are fetched on [`refresh`](Self::refresh).
    pub fn load(store: DashboardStore, source: S) -> Result<Self, StoreError> {
        let symbols = store.load_symbols()?;
        Ok(Self {
            store,
            source,
            symbols,
            quotes: HashMap::new(),
            cursor: 0,
            direction: SlideDirection::default(),
        })
    }

    /// Replaces the watchlist and refetches every symbol.
    ///
    /// Entries are trimmed and uppercased; blank entries are dropped.
    pub async fn set_symbols<I, T>(&mut self, symbols: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.symbols = normalize_symbols(symbols);
        self.store.save_symbols(&self.symbols)?;
        self.cursor = 0;
        self.refresh().await;
        Ok(())
    }

    /// Refetches the watchlist in order, one symbol at a time.
    ///
    /// The cache is rebuilt from scratch, so dropped symbols are forgotten.
    pub async fn refresh(&mut self) {
        let mut quotes = HashMap::with_capacity(self.symbols.len());
        for symbol in &self.symbols {
            let quote = match self.source.fetch_quote(symbol).await {
                Ok(quote) => {
                    debug!(symbol, price = quote.current_price, "quote fetched");
                    Some(quote)
                }
                Err(e) => {
                    warn!(symbol, error = %e, "quote fetch failed");
                    None
                }
            };
            quotes.insert(symbol.clone(), quote);
        }
        self.quotes = quotes;
    }

    pub fn next(&mut self) {
        if self.symbols.is_empty() {
            return;
        }
        self.direction = SlideDirection::Right;
        self.cursor = (self.cursor + 1) % self.symbols.len();
    }

    pub fn previous(&mut self) {
        if self.symbols.is_empty() {
            return;
        }
        self.direction = SlideDirection::Left;
        let len = self.symbols.len();
        self.cursor = (self.cursor + len - 1) % len;
    }
}

impl<S> FinanceController<S> {
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    /// Symbol under the cursor.
    pub fn current(&self) -> Option<&str> {
        self.symbols.get(self.cursor).map(String::as_str)
    }

    /// Cached state for `symbol`: `None` if never fetched, `Some(None)` if
    /// the last fetch failed.
    pub fn quote(&self, symbol: &str) -> Option<Option<&Quote>> {
        self.quotes.get(symbol).map(Option::as_ref)
    }
}

fn normalize_symbols<I, T>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    symbols
        .into_iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn change_style(quote: &Quote) -> Style {
    if quote.is_gain() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

impl<S> Widget for FinanceController<S> {
    fn id(&self) -> &'static str {
        "finance"
    }

    fn title(&self) -> &'static str {
        "Stocks"
    }

    fn render(&self, ctx: &RenderContext) -> Text<'static> {
        let dim = Style::default().fg(Color::DarkGray);
        let Some(symbol) = self.current() else {
            return Text::from(Line::styled("Enter stocks (e.g., AAPL, TSLA)", dim));
        };

        let mut lines = vec![Line::styled(
            symbol.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        match self.quote(symbol) {
            None => lines.push(Line::styled("Loading...", dim)),
            Some(None) => lines.push(Line::styled(
                "Failed to load data.",
                Style::default().fg(Color::Red),
            )),
            Some(Some(quote)) if ctx.is_compact() => {
                lines.push(Line::from(format!("${:.2}", quote.current_price)));
                lines.push(Line::styled(
                    format!("{:+.2}%", quote.percent_change),
                    change_style(quote),
                ));
            }
            Some(Some(quote)) => {
                lines.push(Line::from(vec![
                    Span::styled("Current Price: ", dim),
                    Span::raw(format!("${:.2}", quote.current_price)),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Price Change (%): ", dim),
                    Span::styled(format!("{:+.2}%", quote.percent_change), change_style(quote)),
                ]));
            }
        }
        if !ctx.is_compact() && self.symbols.len() > 1 {
            lines.push(Line::styled(
                format!("‹ {}/{} ›", self.cursor + 1, self.symbols.len()),
                dim,
            ));
        }
        Text::from(lines)
    }
}
