//! Free-text notes with debounced saving.

use std::time::Duration;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Text};
use tracing::{debug, warn};

use super::{RenderContext, Widget};
use crate::schedule::Debouncer;
use crate::store::{DashboardStore, StoreError};

/// Quiet period before an edit is written.
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(1000);

const PLACEHOLDER: &str = "Schreibe hier deine Notizen...";

/// Note text plus a pending debounced write.
pub struct NotesController {
    store: DashboardStore,
    text: String,
    debouncer: Debouncer,
}

impl NotesController {
    /// Restores the saved note.
    pub fn load(store: DashboardStore, save_delay: Duration) -> Result<Self, StoreError> {
        let text = store.load_note()?.unwrap_or_default();
        Ok(Self {
            store,
            text,
            debouncer: Debouncer::new(save_delay),
        })
    }

    /// Replaces the text now and schedules a write after the quiet period.
    ///
    /// Each edit restarts the period, so a burst of edits costs one write.
    /// Must be called from within a Tokio runtime.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let store = self.store.clone();
        let snapshot = self.text.clone();
        self.debouncer.schedule(async move {
            match store.save_note(&snapshot) {
                Ok(()) => debug!(len = snapshot.len(), "note saved"),
                Err(e) => warn!(error = %e, "saving note failed"),
            }
        });
    }

    /// Drops the pending write and saves the current text immediately.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.debouncer.cancel();
        self.store.save_note(&self.text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether an edit is still waiting to be written.
    pub fn has_pending_write(&self) -> bool {
        self.debouncer.is_pending()
    }
}

impl Widget for NotesController {
    fn id(&self) -> &'static str {
        "notes"
    }

    fn title(&self) -> &'static str {
        "Notizen"
    }

    fn render(&self, ctx: &RenderContext) -> Text<'static> {
        if self.text.trim().is_empty() {
            return Text::from(Line::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ));
        }
        if ctx.is_compact() {
            let first = self.text.lines().next().unwrap_or_default();
            return Text::from(first.to_string());
        }
        Text::from(self.text.clone())
    }
}
