//! Drag Interaction Controller
//!
//! Turns a pointer drag on a rendered item into a new position. Deltas are
//! converted to percent of the container and the result is hard-clamped to
//! the canvas, so items dragged past an edge stick to it.

use shared::models::{ItemId, LayoutItem};

use crate::store::{ItemPatch, LayoutStore};
use crate::validation::{MAX_COORDINATE, MIN_COORDINATE};

/// Rendered canvas size, px
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width_px: f64,
    pub height_px: f64,
}

impl CanvasSize {
    pub const fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px,
            height_px,
        }
    }
}

/// Fixed-size editor canvas
pub const REFERENCE_CANVAS: CanvasSize = CanvasSize::new(800.0, 600.0);

/// Pointer movement between drag start and drop, px
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PixelDelta {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

fn axis_percent(delta_px: f64, size_px: f64) -> f64 {
    // A collapsed container (or a garbage delta) moves nothing
    if size_px <= 0.0 || !size_px.is_finite() || delta_px.is_nan() {
        return 0.0;
    }
    delta_px / size_px * 100.0
}

pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(MIN_COORDINATE, MAX_COORDINATE)
}

/// Position after moving `origin` by `delta` on `canvas`, clamped to [0, 100]
pub fn dragged_position(origin: (f64, f64), delta: PixelDelta, canvas: CanvasSize) -> (f64, f64) {
    let dx_pct = axis_percent(delta.dx, canvas.width_px);
    let dy_pct = axis_percent(delta.dy, canvas.height_px);
    (
        clamp_percent(origin.0 + dx_pct),
        clamp_percent(origin.1 + dy_pct),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragOrigin {
    id: ItemId,
    x: f64,
    y: f64,
}

/// One drag at a time; starting a new drag replaces an unfinished one.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DragOrigin>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the item's position at drag start
    pub fn begin(&mut self, item: &LayoutItem) {
        self.active = Some(DragOrigin {
            id: item.id,
            x: item.x_coordinate,
            y: item.y_coordinate,
        });
    }

    /// Start dragging the item with `id`. Returns `false` if it is not in the store.
    pub fn begin_by_id(&mut self, store: &LayoutStore, id: ItemId) -> bool {
        match store.get(id) {
            Some(item) => {
                self.begin(item);
                true
            }
            None => false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_id(&self) -> Option<ItemId> {
        self.active.map(|origin| origin.id)
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Finish the drag and write the clamped position back to the store.
    ///
    /// Returns the new `(x, y)`, or `None` when no drag was in progress.
    pub fn end(
        &mut self,
        delta: PixelDelta,
        canvas: CanvasSize,
        store: &mut LayoutStore,
    ) -> Option<(f64, f64)> {
        let origin = self.active.take()?;
        let (x, y) = dragged_position((origin.x, origin.y), delta, canvas);
        tracing::debug!(id = %origin.id, x, y, "Drag finished");
        store.update_item(origin.id, ItemPatch::position(x, y));
        Some((x, y))
    }
}
