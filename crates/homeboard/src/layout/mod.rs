//! Grid layout for dashboard widgets.
//!
//! Widgets sit on a 12-column grid with 30px rows. Each widget owns one
//! [`LayoutItem`] rectangle in grid units; the [`LayoutController`] keeps the
//! rectangles, converts them to pixel sizes for rendering and persists every
//! change.

mod controller;
mod item;
mod presets;

pub use controller::{timer_footprint, LayoutController, LayoutError};
pub use item::{LayoutItem, PixelSize};
pub use presets::{default_layout, widget_ids};

/// Number of grid columns across the viewport.
pub const GRID_COLUMNS: u32 = 12;

/// Height of one grid row in pixels.
pub const ROW_HEIGHT_PX: u32 = 30;

/// Viewport width assumed when none is configured.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1600;
