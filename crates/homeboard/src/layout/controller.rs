//! Layout state, pixel size map and persistence.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;
use tracing::{debug, warn};

use super::{default_layout, LayoutItem, PixelSize};
use crate::store::{DashboardStore, StoreError};

/// Widget id that only toggles between two fixed footprints when resized.
pub const TIMER_WIDGET_ID: &str = "timer";

/// Small timer footprint `(w, h)`.
pub const TIMER_SMALL: (u32, u32) = (2, 4);

/// Large timer footprint `(w, h)`.
pub const TIMER_LARGE: (u32, u32) = (4, 10);

/// Errors from layout edits.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Two items in a layout share an id.
    #[error("Duplicate widget id in layout: {0}")]
    DuplicateId(String),

    /// No item with the given id exists.
    #[error("Unknown widget: {0}")]
    UnknownWidget(String),

    /// Persisting the layout failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Snaps a requested timer size to one of the two allowed footprints.
///
/// Dragging past 3 columns or 5 rows selects the large footprint; anything
/// else selects the small one. Intermediate sizes are discarded.
pub fn timer_footprint(w: u32, h: u32) -> (u32, u32) {
    if w > 3 || h > 5 {
        TIMER_LARGE
    } else {
        TIMER_SMALL
    }
}

/// Owns the widget rectangles and mirrors every change to the store.
#[derive(Debug)]
pub struct LayoutController {
    store: DashboardStore,
    items: Vec<LayoutItem>,
    viewport_width: u32,
    sizes: BTreeMap<String, PixelSize>,
}

impl LayoutController {
    /// Loads the persisted layout, falling back to [`default_layout`].
    ///
    /// A stored layout that does not decode, or that repeats an id, is
    /// replaced by the default and the default is written back.
    ///
    /// # Errors
    ///
    /// Returns store backend failures. Corrupt data is not an error.
    pub fn load(store: DashboardStore, viewport_width: u32) -> Result<Self, StoreError> {
        let items = match store.load_layout() {
            Ok(Some(mut items)) => match first_duplicate(&items) {
                None => {
                    if normalize(&mut items) {
                        warn!("stored layout breaks size rules, rewriting it");
                        store.save_layout(&items)?;
                    }
                    items
                }
                Some(id) => {
                    warn!(id = %id, "stored layout repeats a widget id, restoring default");
                    let items = default_layout();
                    store.save_layout(&items)?;
                    items
                }
            },
            Ok(None) => {
                debug!("no stored layout, using default");
                default_layout()
            }
            Err(e) if e.is_corrupt() => {
                warn!(error = %e, "stored layout is corrupt, restoring default");
                let items = default_layout();
                store.save_layout(&items)?;
                items
            }
            Err(e) => return Err(e),
        };

        let mut controller = Self {
            store,
            items,
            viewport_width,
            sizes: BTreeMap::new(),
        };
        controller.recompute_sizes();
        Ok(controller)
    }

    /// Current rectangles, in layout order.
    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    /// Rectangle for `id`.
    pub fn item(&self, id: &str) -> Option<&LayoutItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Pixel size for `id`.
    pub fn size_of(&self, id: &str) -> Option<PixelSize> {
        self.sizes.get(id).copied()
    }

    /// Pixel sizes of every widget, keyed by id.
    pub fn sizes(&self) -> &BTreeMap<String, PixelSize> {
        &self.sizes
    }

    /// Viewport width in pixels.
    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// Changes the viewport width and recomputes pixel sizes.
    ///
    /// Grid units are unchanged, so nothing is persisted.
    pub fn set_viewport_width(&mut self, viewport_width: u32) {
        self.viewport_width = viewport_width;
        self.recompute_sizes();
    }

    /// Replaces the whole layout, as after a drag or resize completes.
    ///
    /// The timer is snapped to [`timer_footprint`] and every other item is
    /// clamped into its min/max bounds before the layout is stored.
    ///
    /// # Errors
    ///
    /// Rejects layouts with duplicate ids without changing state.
    pub fn replace(&mut self, mut layout: Vec<LayoutItem>) -> Result<(), LayoutError> {
        if let Some(id) = first_duplicate(&layout) {
            return Err(LayoutError::DuplicateId(id.to_string()));
        }
        normalize(&mut layout);
        self.items = layout;
        self.commit()
    }

    /// Moves one widget to grid position `(x, y)`.
    pub fn move_item(&mut self, id: &str, x: u32, y: u32) -> Result<LayoutItem, LayoutError> {
        let mut layout = self.items.clone();
        let item = find_mut(&mut layout, id)?;
        item.x = x;
        item.y = y;
        let moved = item.clone();
        self.replace(layout)?;
        Ok(moved)
    }

    /// Resizes one widget to `(w, h)` grid units.
    ///
    /// The timer widget snaps to [`timer_footprint`]; every other widget is
    /// clamped into its min/max bounds.
    pub fn resize(&mut self, id: &str, w: u32, h: u32) -> Result<LayoutItem, LayoutError> {
        let mut layout = self.items.clone();
        let item = find_mut(&mut layout, id)?;
        item.w = w;
        item.h = h;
        self.replace(layout)?;
        let resized = self
            .item(id)
            .cloned()
            .ok_or_else(|| LayoutError::UnknownWidget(id.to_string()))?;
        debug!(id, w = resized.w, h = resized.h, "widget resized");
        Ok(resized)
    }

    /// Restores and persists the default layout.
    pub fn reset(&mut self) -> Result<(), LayoutError> {
        self.replace(default_layout())
    }

    fn commit(&mut self) -> Result<(), LayoutError> {
        self.recompute_sizes();
        self.store.save_layout(&self.items)?;
        Ok(())
    }

    fn recompute_sizes(&mut self) {
        self.sizes = self
            .items
            .iter()
            .map(|i| (i.id.clone(), i.pixel_size(self.viewport_width)))
            .collect();
    }
}

/// Applies the timer footprint rule and the min/max bounds to every item.
///
/// Returns whether anything changed.
fn normalize(layout: &mut [LayoutItem]) -> bool {
    let mut changed = false;
    for item in layout.iter_mut() {
        let before = (item.w, item.h);
        if item.id == TIMER_WIDGET_ID {
            (item.w, item.h) = timer_footprint(item.w, item.h);
        } else {
            item.clamp_to_bounds();
        }
        changed |= before != (item.w, item.h);
    }
    changed
}

fn find_mut<'a>(layout: &'a mut [LayoutItem], id: &str) -> Result<&'a mut LayoutItem, LayoutError> {
    layout
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| LayoutError::UnknownWidget(id.to_string()))
}

fn first_duplicate(items: &[LayoutItem]) -> Option<&str> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|i| i.id.as_str())
        .find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{keys, KeyValueStore, MemoryStore};

    fn controller() -> (LayoutController, MemoryStore) {
        let backend = MemoryStore::new();
        let ctl = LayoutController::load(DashboardStore::new(backend.clone()), 1200)
            .expect("load");
        (ctl, backend)
    }

    #[test]
    fn test_load_without_stored_layout_uses_default() {
        let (ctl, backend) = controller();
        assert_eq!(ctl.items(), default_layout().as_slice());
        assert!(backend.get(keys::LAYOUT).expect("get").is_none(), "default is not written");
    }

    #[test]
    fn test_replace_then_load_round_trips() {
        let (mut ctl, backend) = controller();
        let layout = vec![
            LayoutItem::new("notes", 0, 0, 12, 4),
            LayoutItem::new("todo", 0, 4, 5, 9).with_height_bounds(2, 20),
        ];
        ctl.replace(layout.clone()).expect("replace");

        let reloaded = LayoutController::load(DashboardStore::new(backend), 1200).expect("load");
        assert_eq!(reloaded.items(), layout.as_slice());
    }

    #[test]
    fn test_corrupt_layout_falls_back_and_is_overwritten() {
        let backend = MemoryStore::new();
        backend.set(keys::LAYOUT, "[{\"i\":").expect("set");
        let ctl = LayoutController::load(DashboardStore::new(backend.clone()), 1200).expect("load");
        assert_eq!(ctl.items(), default_layout().as_slice());

        let stored = backend.get(keys::LAYOUT).expect("get").expect("rewritten");
        let parsed: Vec<LayoutItem> = serde_json::from_str(&stored).expect("valid json");
        assert_eq!(parsed, default_layout());
    }

    #[test]
    fn test_stored_layout_with_duplicate_ids_is_replaced() {
        let backend = MemoryStore::new();
        let dup = vec![LayoutItem::new("todo", 0, 0, 1, 1), LayoutItem::new("todo", 1, 0, 1, 1)];
        backend
            .set(keys::LAYOUT, &serde_json::to_string(&dup).expect("json"))
            .expect("set");
        let ctl = LayoutController::load(DashboardStore::new(backend), 1200).expect("load");
        assert_eq!(ctl.items(), default_layout().as_slice());
    }

    #[test]
    fn test_replace_rejects_duplicate_ids() {
        let (mut ctl, _) = controller();
        let before = ctl.items().to_vec();
        let err = ctl
            .replace(vec![LayoutItem::new("a", 0, 0, 1, 1), LayoutItem::new("a", 0, 1, 1, 1)])
            .expect_err("duplicate");
        assert!(matches!(err, LayoutError::DuplicateId(ref id) if id == "a"));
        assert_eq!(ctl.items(), before.as_slice());
    }

    #[test]
    fn test_sizes_follow_grid_units() {
        let (ctl, _) = controller();
        // 1200px / 12 columns = 100px per column.
        assert_eq!(ctl.size_of("weather"), Some(PixelSize::new(300.0, 180.0)));
        assert_eq!(ctl.size_of("todo"), Some(PixelSize::new(300.0, 300.0)));
        assert_eq!(ctl.size_of("missing"), None);
        assert_eq!(ctl.sizes().len(), 5);
    }

    #[test]
    fn test_set_viewport_width_recomputes_sizes() {
        let (mut ctl, _) = controller();
        ctl.set_viewport_width(2400);
        assert_eq!(ctl.viewport_width(), 2400);
        assert_eq!(ctl.size_of("weather"), Some(PixelSize::new(600.0, 180.0)));
    }

    #[test]
    fn test_timer_resize_snaps_large_past_threshold() {
        let (mut ctl, _) = controller();
        for (w, h) in [(4, 1), (1, 6), (12, 40), (4, 4), (3, 6)] {
            let item = ctl.resize("timer", w, h).expect("resize");
            assert_eq!((item.w, item.h), (4, 10), "resize to ({w},{h})");
        }
    }

    #[test]
    fn test_timer_resize_snaps_small_otherwise() {
        let (mut ctl, _) = controller();
        ctl.resize("timer", 4, 10).expect("grow first");
        for (w, h) in [(3, 5), (1, 1), (0, 0), (2, 4), (3, 1)] {
            let item = ctl.resize("timer", w, h).expect("resize");
            assert_eq!((item.w, item.h), (2, 4), "resize to ({w},{h})");
        }
    }

    #[test]
    fn test_timer_footprint_boundaries() {
        assert_eq!(timer_footprint(3, 5), TIMER_SMALL);
        assert_eq!(timer_footprint(4, 5), TIMER_LARGE);
        assert_eq!(timer_footprint(3, 6), TIMER_LARGE);
    }

    #[test]
    fn test_resize_other_widget_clamps_to_bounds() {
        let (mut ctl, _) = controller();
        ctl.replace(vec![LayoutItem::new("todo", 0, 0, 3, 3).with_width_bounds(2, 6)])
            .expect("replace");
        let item = ctl.resize("todo", 10, 7).expect("resize");
        assert_eq!((item.w, item.h), (6, 7));
    }

    #[test]
    fn test_resize_persists_and_updates_sizes() {
        let (mut ctl, backend) = controller();
        ctl.resize("notes", 12, 2).expect("resize");
        assert_eq!(ctl.size_of("notes"), Some(PixelSize::new(1200.0, 60.0)));
        let stored: Vec<LayoutItem> =
            serde_json::from_str(&backend.get(keys::LAYOUT).expect("get").expect("saved"))
                .expect("json");
        let notes = stored.iter().find(|i| i.id == "notes").expect("notes");
        assert_eq!((notes.w, notes.h), (12, 2));
    }

    #[test]
    fn test_move_item() {
        let (mut ctl, _) = controller();
        let moved = ctl.move_item("finance", 0, 20).expect("move");
        assert_eq!((moved.x, moved.y), (0, 20));
        assert_eq!(ctl.item("finance"), Some(&moved));
    }

    #[test]
    fn test_unknown_widget_is_error() {
        let (mut ctl, _) = controller();
        assert!(matches!(
            ctl.resize("clock", 1, 1),
            Err(LayoutError::UnknownWidget(_))
        ));
        assert!(matches!(
            ctl.move_item("clock", 1, 1),
            Err(LayoutError::UnknownWidget(_))
        ));
    }

    #[test]
    fn test_replace_snaps_timer_and_clamps_bounds() {
        let (mut ctl, backend) = controller();
        let mut layout = default_layout();
        for item in &mut layout {
            match item.id.as_str() {
                "timer" => (item.w, item.h) = (3, 7),
                "weather" => {
                    item.max_w = Some(4);
                    item.w = 9;
                }
                _ => {}
            }
        }
        ctl.replace(layout).expect("replace");
        let timer = ctl.item("timer").expect("timer");
        assert_eq!((timer.w, timer.h), TIMER_LARGE);
        assert_eq!(ctl.item("weather").map(|i| i.w), Some(4));

        let stored: Vec<LayoutItem> =
            serde_json::from_str(&backend.get(keys::LAYOUT).expect("get").expect("saved"))
                .expect("json");
        let timer = stored.iter().find(|i| i.id == "timer").expect("timer");
        assert_eq!((timer.w, timer.h), TIMER_LARGE);

        let mut layout = ctl.items().to_vec();
        for item in &mut layout {
            if item.id == "timer" {
                (item.w, item.h) = (1, 2);
            }
        }
        ctl.replace(layout).expect("replace");
        let timer = ctl.item("timer").expect("timer");
        assert_eq!((timer.w, timer.h), TIMER_SMALL);
    }

    #[test]
    fn test_load_snaps_stored_timer() {
        let backend = MemoryStore::new();
        let mut layout = default_layout();
        for item in &mut layout {
            if item.id == "timer" {
                (item.w, item.h) = (12, 40);
            }
        }
        backend
            .set(keys::LAYOUT, &serde_json::to_string(&layout).expect("json"))
            .expect("set");
        let ctl = LayoutController::load(DashboardStore::new(backend.clone()), 1200).expect("load");
        let timer = ctl.item("timer").expect("timer");
        assert_eq!((timer.w, timer.h), TIMER_LARGE);

        let stored: Vec<LayoutItem> =
            serde_json::from_str(&backend.get(keys::LAYOUT).expect("get").expect("saved"))
                .expect("json");
        assert_eq!(stored, ctl.items());
    }

    #[test]
    fn test_reset_restores_default() {
        let (mut ctl, _) = controller();
        ctl.resize("notes", 12, 2).expect("resize");
        ctl.reset().expect("reset");
        assert_eq!(ctl.items(), default_layout().as_slice());
    }
}
