//! Layout editor session
//!
//! Admin-side editing of one restaurant's floor plan: load, add/move/remove
//! items locally, then submit the whole layout as a replacement.

use dine_floor::validation::{parse_capacity, parse_dimension, validate_layout};
use dine_floor::{
    CanvasSize, DragController, ItemPatch, LayoutStore, LoadTicket, NewItem, PixelDelta,
    REFERENCE_CANVAS,
};
use shared::models::{ItemId, LayoutItem, Restaurant, TableShape, TableType};

use crate::error::FloorPlanError;
use crate::LayoutBackend;

/// Shown when the server accepts a layout without saying anything
pub const SAVED_MESSAGE: &str = "Layout updated successfully.";

/// Result of a fetch, waiting to be applied
#[derive(Debug, Clone)]
pub struct LoadedLayout {
    ticket: LoadTicket,
    items: Vec<LayoutItem>,
    restaurant: Restaurant,
}

impl LoadedLayout {
    pub fn restaurant_id(&self) -> i64 {
        self.ticket.restaurant_id
    }
}

pub struct LayoutEditor<B> {
    backend: B,
    store: LayoutStore,
    drag: DragController,
    canvas: CanvasSize,
    restaurant: Option<Restaurant>,
    message: Option<String>,
}

impl<B: LayoutBackend> LayoutEditor<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            store: LayoutStore::new(),
            drag: DragController::new(),
            canvas: REFERENCE_CANVAS,
            restaurant: None,
            message: None,
        }
    }

    /// Use the rendered container size for drag conversion
    pub fn with_canvas(mut self, canvas: CanvasSize) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn set_canvas(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    pub fn items(&self) -> &[LayoutItem] {
        self.store.items()
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn restaurant_id(&self) -> Option<i64> {
        self.store.restaurant_id()
    }

    /// Header metadata of the loaded restaurant
    pub fn restaurant(&self) -> Option<&Restaurant> {
        self.restaurant.as_ref()
    }

    /// Last success message
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    // ========== Loading ==========

    /// Start a load; earlier tickets become stale
    pub fn begin_load(&mut self, restaurant_id: i64) -> LoadTicket {
        self.store.begin_load(restaurant_id)
    }

    /// Fetch layout and restaurant header for `ticket`. Touches no local state.
    pub async fn fetch(&self, ticket: LoadTicket) -> Result<LoadedLayout, FloorPlanError> {
        let restaurant_id = ticket.restaurant_id;
        let (items, restaurant) = tokio::try_join!(
            self.backend.layout(restaurant_id),
            self.backend.restaurant(restaurant_id),
        )
        .map_err(|e| {
            tracing::warn!(restaurant_id, status = ?e.status(), error = %e, "Failed to load layout");
            FloorPlanError::load(e)
        })?;
        Ok(LoadedLayout {
            ticket,
            items,
            restaurant,
        })
    }

    /// Apply a fetched layout. Returns `false` if a newer load was started.
    pub fn apply_loaded(&mut self, loaded: LoadedLayout) -> bool {
        let LoadedLayout {
            ticket,
            items,
            restaurant,
        } = loaded;
        let count = items.len();
        if !self.store.finish_load(ticket, items) {
            return false;
        }
        tracing::info!(
            restaurant_id = ticket.restaurant_id,
            items = count,
            "Layout loaded"
        );
        self.restaurant = Some(restaurant);
        self.drag.cancel();
        self.message = None;
        true
    }

    /// Replace the local layout with the server's. On failure the current
    /// layout, including unsaved edits, is kept.
    pub async fn load(&mut self, restaurant_id: i64) -> Result<(), FloorPlanError> {
        let ticket = self.begin_load(restaurant_id);
        let loaded = self.fetch(ticket).await?;
        self.apply_loaded(loaded);
        Ok(())
    }

    // ========== Editing ==========

    pub fn add_item(&mut self, new_item: NewItem) -> ItemId {
        self.store.add_item(new_item)
    }

    /// Add a table from the editor form; capacity comes in as typed
    pub fn add_table_from_form(
        &mut self,
        table_type: TableType,
        capacity: &str,
    ) -> Result<ItemId, FloorPlanError> {
        let capacity = parse_capacity(capacity)?;
        Ok(self.add_item(NewItem::Table {
            table_type,
            capacity,
            shape: TableShape::Rectangle,
        }))
    }

    /// Add furniture from the editor form; sizes in percent of the canvas
    pub fn add_furniture_from_form(
        &mut self,
        width: &str,
        height: &str,
        color: &str,
    ) -> Result<ItemId, FloorPlanError> {
        let width = parse_dimension(width, "width")?;
        let height = parse_dimension(height, "height")?;
        Ok(self.add_item(NewItem::Furniture {
            name: None,
            width,
            height,
            color: color.to_string(),
        }))
    }

    /// Merge `patch` into the item; unknown ids are ignored
    pub fn update_item(&mut self, id: ItemId, patch: ItemPatch) {
        self.store.update_item(id, patch);
    }

    pub fn remove_item(&mut self, id: ItemId) {
        if self.drag.active_id() == Some(id) {
            self.drag.cancel();
        }
        self.store.remove_item(id);
    }

    pub fn begin_drag(&mut self, id: ItemId) -> bool {
        self.drag.begin_by_id(&self.store, id)
    }

    /// Drop the dragged item `delta` px away from where the drag started
    pub fn end_drag(&mut self, delta: PixelDelta) -> Option<(f64, f64)> {
        self.drag.end(delta, self.canvas, &mut self.store)
    }

    // ========== Saving ==========

    /// Submit the full layout as a replacement.
    ///
    /// On failure the local layout stays as it is so the save can be retried.
    pub async fn save(&mut self) -> Result<String, FloorPlanError> {
        self.message = None;
        let restaurant_id = self
            .store
            .restaurant_id()
            .ok_or_else(FloorPlanError::save_not_loaded)?;
        validate_layout(self.store.items())?;

        match self
            .backend
            .replace_layout(restaurant_id, self.store.items())
            .await
        {
            Ok(message) => {
                let message = if message.is_empty() {
                    SAVED_MESSAGE.to_string()
                } else {
                    message
                };
                tracing::info!(
                    restaurant_id,
                    items = self.store.items().len(),
                    "Layout saved"
                );
                self.store.mark_saved();
                self.message = Some(message.clone());
                Ok(message)
            }
            Err(e) => {
                tracing::warn!(restaurant_id, status = ?e.status(), error = %e, "Failed to save layout");
                Err(FloorPlanError::save(e))
            }
        }
    }

    /// Replace the local layout with a server-generated suggestion. The
    /// suggestion counts as an unsaved edit.
    pub async fn suggest_layout(&mut self) -> Result<(), FloorPlanError> {
        let restaurant_id = self
            .store
            .restaurant_id()
            .ok_or_else(FloorPlanError::not_loaded)?;
        let items = self
            .backend
            .suggest_layout(restaurant_id)
            .await
            .map_err(|e| {
                tracing::warn!(
                    restaurant_id,
                    status = ?e.status(),
                    error = %e,
                    "Failed to get layout suggestion"
                );
                FloorPlanError::suggest(e)
            })?;
        self.drag.cancel();
        self.store.replace_all(items);
        Ok(())
    }
}
