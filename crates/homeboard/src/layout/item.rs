//! Layout rectangle and pixel size types.

use serde::{Deserialize, Serialize};

use super::{GRID_COLUMNS, ROW_HEIGHT_PX};
use crate::widgets::is_compact;

/// Position and size of one widget, in grid units.
///
/// Serialized with the short field names grid libraries use (`i`, `minW`,
/// ...). `id` is accepted as an alias for `i` on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    /// Widget identifier, unique within a layout.
    #[serde(rename = "i", alias = "id")]
    pub id: String,
    /// Column of the left edge.
    pub x: u32,
    /// Row of the top edge.
    pub y: u32,
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
    /// Minimum width in columns.
    #[serde(rename = "minW", default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    /// Maximum width in columns.
    #[serde(rename = "maxW", default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
    /// Minimum height in rows.
    #[serde(rename = "minH", default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    /// Maximum height in rows.
    #[serde(rename = "maxH", default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u32>,
}

impl LayoutItem {
    /// Creates an unbounded item.
    pub fn new(id: &str, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.to_string(),
            x,
            y,
            w,
            h,
            min_w: None,
            max_w: None,
            min_h: None,
            max_h: None,
        }
    }

    /// Sets width bounds.
    pub fn with_width_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_w = Some(min);
        self.max_w = Some(max);
        self
    }

    /// Sets height bounds.
    pub fn with_height_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_h = Some(min);
        self.max_h = Some(max);
        self
    }

    /// Clamps `w` and `h` into the item's bounds, where bounds are set.
    pub fn clamp_to_bounds(&mut self) {
        self.w = clamp_opt(self.w, self.min_w, self.max_w);
        self.h = clamp_opt(self.h, self.min_h, self.max_h);
    }

    /// Pixel footprint for a viewport of `viewport_width` pixels.
    pub fn pixel_size(&self, viewport_width: u32) -> PixelSize {
        let column_px = f64::from(viewport_width) / f64::from(GRID_COLUMNS);
        PixelSize {
            width: f64::from(self.w) * column_px,
            height: f64::from(self.h) * f64::from(ROW_HEIGHT_PX),
        }
    }
}

fn clamp_opt(value: u32, min: Option<u32>, max: Option<u32>) -> u32 {
    let value = min.map_or(value, |m| value.max(m));
    max.map_or(value, |m| value.min(m))
}

/// Rendered size of a widget in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl PixelSize {
    /// Creates a pixel size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether a widget of this size renders in compact mode.
    pub fn is_compact(&self) -> bool {
        is_compact(self.width, self.height)
    }
}
