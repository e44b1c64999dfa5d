//! To-do list widget.

use std::sync::Arc;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{RenderContext, Widget};
use crate::clock::{timestamp_id, Clock};
use crate::store::{DashboardStore, StoreError};

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Creation timestamp in milliseconds; unique within the list.
    pub id: i64,
    /// Trimmed entry text.
    pub text: String,
    /// Whether the entry is done.
    pub completed: bool,
}

/// Owns the to-do list and persists it after every change.
pub struct TodoController {
    store: DashboardStore,
    clock: Arc<dyn Clock>,
    todos: Vec<TodoItem>,
}

impl TodoController {
    /// Loads the list from the store. A corrupt list starts empty.
    pub fn load(store: DashboardStore, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let todos = match store.load_todos() {
            Ok(todos) => todos.unwrap_or_default(),
            Err(e) if e.is_corrupt() => {
                warn!(error = %e, "stored todos are corrupt, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            store,
            clock,
            todos,
        })
    }

    /// Appends a new open item.
    ///
    /// Returns the new id, or `None` if `text` is blank.
    pub fn add(&mut self, text: &str) -> Result<Option<i64>, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let id = timestamp_id(self.clock.now(), self.todos.iter().map(|t| t.id));
        self.todos.push(TodoItem {
            id,
            text: text.to_string(),
            completed: false,
        });
        self.save()?;
        debug!(id, "todo added");
        Ok(Some(id))
    }

    /// Flips the completed flag of `id`. Returns `false` if no such item.
    pub fn toggle(&mut self, id: i64) -> Result<bool, StoreError> {
        let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        todo.completed = !todo.completed;
        self.save()?;
        Ok(true)
    }

    /// Removes `id`. Returns `false` if no such item.
    pub fn remove(&mut self, id: i64) -> Result<bool, StoreError> {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        if self.todos.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Open items, then completed items, each in insertion order.
    pub fn list(&self) -> Vec<&TodoItem> {
        let open = self.todos.iter().filter(|t| !t.completed);
        let done = self.todos.iter().filter(|t| t.completed);
        open.chain(done).collect()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[TodoItem] {
        &self.todos
    }

    fn save(&self) -> Result<(), StoreError> {
        self.store.save_todos(&self.todos)
    }
}

impl Widget for TodoController {
    fn id(&self) -> &'static str {
        "todo"
    }

    fn title(&self) -> &'static str {
        "To-Do"
    }

    fn render(&self, ctx: &RenderContext) -> Text<'static> {
        let open = self.todos.iter().filter(|t| !t.completed).count();
        if ctx.is_compact() {
            return Text::from(format!("{open} open · + Add a ToDo"));
        }

        let mut lines = Vec::new();
        let mut separated = false;
        for todo in self.list() {
            if todo.completed && !separated {
                lines.push(Line::styled("────────", Style::default().fg(Color::DarkGray)));
                separated = true;
            }
            let (mark, style) = if todo.completed {
                (
                    "[x]",
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ]", Style::default())
            };
            lines.push(Line::from(vec![
                Span::raw(format!("{mark} ")),
                Span::styled(todo.text.clone(), style),
            ]));
        }
        if lines.is_empty() {
            lines.push(Line::styled("Nothing to do", Style::default().fg(Color::DarkGray)));
        }
        Text::from(lines)
    }
}
