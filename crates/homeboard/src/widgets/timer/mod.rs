//! Timer widget: countdowns and a stopwatch behind two tabs.

mod countdown;
mod stopwatch;

pub use countdown::{
    target_from_inputs, Countdown, CountdownController, CountdownStatus, Remaining, TARGET_FORMAT,
};
pub use stopwatch::{format_hms, Stopwatch};

use std::sync::Arc;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use super::{RenderContext, Widget};
use crate::clock::Clock;
use crate::store::{DashboardStore, StoreError};

/// Visible tab of the timer widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerTab {
    #[default]
    Countdown,
    Stopwatch,
}

impl TimerTab {
    fn label(self) -> &'static str {
        match self {
            TimerTab::Countdown => "Countdown",
            TimerTab::Stopwatch => "Stoppuhr",
        }
    }
}

/// Combined timer widget state.
pub struct TimerWidget {
    countdowns: CountdownController,
    stopwatch: Stopwatch,
    tab: TimerTab,
}

impl TimerWidget {
    /// Loads both halves from the store. Starts on the countdown tab.
    pub fn load(store: DashboardStore, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        Ok(Self {
            countdowns: CountdownController::load(store.clone(), clock)?,
            stopwatch: Stopwatch::load(store)?,
            tab: TimerTab::default(),
        })
    }

    pub fn countdowns(&self) -> &CountdownController {
        &self.countdowns
    }

    pub fn countdowns_mut(&mut self) -> &mut CountdownController {
        &mut self.countdowns
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn stopwatch_mut(&mut self) -> &mut Stopwatch {
        &mut self.stopwatch
    }

    pub fn tab(&self) -> TimerTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: TimerTab) {
        self.tab = tab;
    }

    fn tab_bar(&self) -> Line<'static> {
        let spans = [TimerTab::Countdown, TimerTab::Stopwatch]
            .into_iter()
            .enumerate()
            .flat_map(|(i, tab)| {
                let sep = if i == 0 { "" } else { " | " };
                let style = if tab == self.tab {
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                [Span::raw(sep), Span::styled(tab.label(), style)]
            })
            .collect::<Vec<_>>();
        Line::from(spans)
    }

    fn countdown_lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let Some(current) = self.countdowns.current() else {
            return vec![Line::styled(
                "Kein Countdown",
                Style::default().fg(Color::DarkGray),
            )];
        };
        let status = current.status(ctx.now.naive_local());
        let status_style = if status.is_expired() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let mut lines = vec![
            Line::from(current.name.clone()),
            Line::styled(status.to_string(), status_style),
        ];
        if !ctx.is_compact() {
            let total = self.countdowns.countdowns().len();
            lines.push(Line::styled(
                format!("‹ {}/{} ›", self.countdowns.cursor() + 1, total),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines
    }

    fn stopwatch_lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let mut lines = vec![Line::styled(
            self.stopwatch.display(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !ctx.is_compact() {
            let state = if self.stopwatch.is_running() {
                "läuft"
            } else {
                "angehalten"
            };
            lines.push(Line::styled(state, Style::default().fg(Color::DarkGray)));
        }
        lines
    }
}

impl Widget for TimerWidget {
    fn id(&self) -> &'static str {
        "timer"
    }

    fn title(&self) -> &'static str {
        "Timer"
    }

    fn render(&self, ctx: &RenderContext) -> Text<'static> {
        let mut lines = vec![self.tab_bar()];
        lines.extend(match self.tab {
            TimerTab::Countdown => self.countdown_lines(ctx),
            TimerTab::Stopwatch => self.stopwatch_lines(ctx),
        });
        Text::from(lines)
    }
}
