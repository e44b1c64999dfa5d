//! Built-in default layout.
//!
//! Used on first start and whenever the stored layout is unreadable.
//!
//! ```text
//! columns: 0     3     6     9  11 12
//!          +-----+-----+-----+--+
//!          |weath|finan|todo |tm|
//!          +-----+-----+     +--+
//!          |   notes   |     |
//! ```

use super::LayoutItem;

/// Widget ids in default layout order.
pub fn widget_ids() -> [&'static str; 5] {
    ["weather", "finance", "todo", "timer", "notes"]
}

/// The five-widget default layout.
///
/// The timer's bounds span exactly its two allowed footprints.
pub fn default_layout() -> Vec<LayoutItem> {
    vec![
        LayoutItem::new("weather", 0, 0, 3, 6),
        LayoutItem::new("finance", 3, 0, 3, 6),
        LayoutItem::new("todo", 6, 0, 3, 10),
        LayoutItem::new("timer", 9, 0, 2, 4)
            .with_width_bounds(2, 4)
            .with_height_bounds(4, 10),
        LayoutItem::new("notes", 0, 6, 6, 8),
    ]
}
