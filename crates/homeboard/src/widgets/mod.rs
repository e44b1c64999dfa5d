//! Dashboard widgets.
//!
//! Each widget is a controller that owns one slice of dashboard state,
//! mirrors it to the [`DashboardStore`](crate::store::DashboardStore) and
//! renders itself through the [`Widget`] trait.
//!
//! # Rendering
//!
//! Widgets render to ratatui [`Text`] given a [`RenderContext`] carrying the
//! widget's pixel footprint (from the layout) and the current time. Small
//! footprints switch to compact mode via the shared [`is_compact`] predicate.
//!
//! # Example
//!
//! ```
//! use homeboard::widgets::is_compact;
//!
//! assert!(is_compact(300.0, 200.0));
//! assert!(!is_compact(301.0, 201.0));
//! ```

pub mod finance;
pub mod notes;
pub mod timer;
pub mod todo;
pub mod weather;

use chrono::{DateTime, Local};
use ratatui::text::Text;

use crate::layout::PixelSize;

/// Widest footprint, in pixels, that still renders compact.
pub const COMPACT_MAX_WIDTH: f64 = 300.0;

/// Tallest footprint, in pixels, that still renders compact.
pub const COMPACT_MAX_HEIGHT: f64 = 200.0;

/// Whether a widget of `width` x `height` pixels renders in compact mode.
///
/// Either dimension being small is enough.
pub fn is_compact(width: f64, height: f64) -> bool {
    width <= COMPACT_MAX_WIDTH || height <= COMPACT_MAX_HEIGHT
}

/// Per-render inputs shared by all widgets.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    /// Pixel footprint of the widget.
    pub size: PixelSize,
    /// Current local time.
    pub now: DateTime<Local>,
}

impl RenderContext {
    /// Creates a render context.
    pub fn new(size: PixelSize, now: DateTime<Local>) -> Self {
        Self { size, now }
    }

    /// Whether the widget should render compact.
    pub fn is_compact(&self) -> bool {
        self.size.is_compact()
    }
}

/// A renderable dashboard widget.
pub trait Widget {
    /// Layout id of the widget.
    fn id(&self) -> &'static str;

    /// Heading shown above the widget.
    fn title(&self) -> &'static str;

    /// Renders the widget body.
    fn render(&self, ctx: &RenderContext) -> Text<'static>;
}
