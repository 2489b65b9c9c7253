//! Layout State Store
//!
//! The in-memory layout of the restaurant currently open in the editor.
//! State changes go through [`reduce`], a plain `(state, action) -> state`
//! function; [`LayoutStore`] wraps it with provisional id generation and
//! load tickets.

use serde::{Deserialize, Serialize};
use shared::models::{
    FurnitureSpec, ItemId, ItemKind, LayoutItem, TableShape, TableSpec, TableType,
};
use shared::util::now_millis;

/// Position given to items added in the editor, percent
pub const NEW_ITEM_POSITION: f64 = 10.0;

pub const DEFAULT_CAPACITY: u32 = 4;
pub const DEFAULT_FURNITURE_WIDTH: f64 = 15.0;
pub const DEFAULT_FURNITURE_HEIGHT: f64 = 10.0;
pub const DEFAULT_FURNITURE_COLOR: &str = "#4a5568";

/// Identifies one load request. A completed load only applies if its ticket
/// is still the latest one issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub restaurant_id: i64,
    generation: u64,
}

/// Item to add from the editor's "new item" controls
#[derive(Debug, Clone, PartialEq)]
pub enum NewItem {
    Table {
        table_type: TableType,
        capacity: u32,
        shape: TableShape,
    },
    Furniture {
        /// `None` picks `Furniture N`
        name: Option<String>,
        width: f64,
        height: f64,
        color: String,
    },
}

impl NewItem {
    pub fn table(table_type: TableType, capacity: u32) -> Self {
        Self::Table {
            table_type,
            capacity,
            shape: TableShape::Rectangle,
        }
    }

    pub fn furniture() -> Self {
        Self::Furniture {
            name: None,
            width: DEFAULT_FURNITURE_WIDTH,
            height: DEFAULT_FURNITURE_HEIGHT,
            color: DEFAULT_FURNITURE_COLOR.to_string(),
        }
    }
}

impl Default for NewItem {
    fn default() -> Self {
        Self::table(TableType::Standard, DEFAULT_CAPACITY)
    }
}

/// Partial update merged into an existing item.
///
/// Fields that do not apply to the item's type are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    pub x_coordinate: Option<f64>,
    pub y_coordinate: Option<f64>,
    pub table_number: Option<i32>,
    pub table_type: Option<TableType>,
    pub capacity: Option<u32>,
    pub shape: Option<TableShape>,
    pub name: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub color: Option<String>,
}

impl ItemPatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x_coordinate: Some(x),
            y_coordinate: Some(y),
            ..Default::default()
        }
    }

    fn apply(&self, item: &mut LayoutItem) {
        if let Some(x) = self.x_coordinate {
            item.x_coordinate = x;
        }
        if let Some(y) = self.y_coordinate {
            item.y_coordinate = y;
        }
        match &mut item.kind {
            ItemKind::Table(table) => {
                if let Some(number) = self.table_number {
                    table.table_number = number;
                }
                if let Some(table_type) = self.table_type {
                    table.table_type = table_type;
                }
                if let Some(capacity) = self.capacity {
                    table.capacity = capacity;
                }
                if let Some(shape) = self.shape {
                    table.shape = shape;
                }
            }
            ItemKind::Furniture(furniture) => {
                if let Some(name) = &self.name {
                    furniture.name = name.clone();
                }
                if let Some(width) = self.width {
                    furniture.width = width;
                }
                if let Some(height) = self.height {
                    furniture.height = height;
                }
                if let Some(color) = &self.color {
                    furniture.color = color.clone();
                }
            }
        }
    }
}

/// State transitions of the layout
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutAction {
    /// Server layout arrived for `ticket`
    Loaded {
        ticket: LoadTicket,
        items: Vec<LayoutItem>,
    },
    /// Local replacement not yet saved (e.g. a suggested layout)
    Replaced(Vec<LayoutItem>),
    Add(LayoutItem),
    Update { id: ItemId, patch: ItemPatch },
    Remove(ItemId),
    /// Full layout accepted by the server
    Saved,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutState {
    restaurant_id: Option<i64>,
    items: Vec<LayoutItem>,
    dirty: bool,
    generation: u64,
}

impl LayoutState {
    pub fn restaurant_id(&self) -> Option<i64> {
        self.restaurant_id
    }

    pub fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    /// Unsaved local edits exist
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get(&self, id: ItemId) -> Option<&LayoutItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Issue a ticket for a new load; any earlier ticket becomes stale
    pub fn begin_load(&mut self, restaurant_id: i64) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            restaurant_id,
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn table_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_table()).count()
    }

    pub fn furniture_count(&self) -> usize {
        self.items.len() - self.table_count()
    }

    /// Smallest number above every table number in use
    pub fn next_table_number(&self) -> i32 {
        self.items
            .iter()
            .filter_map(|item| item.as_table().map(|t| t.table_number))
            .max()
            .map_or(1, |n| n + 1)
    }
}

/// Apply one action. Unknown ids and stale load tickets leave the state as is.
pub fn reduce(mut state: LayoutState, action: LayoutAction) -> LayoutState {
    match action {
        LayoutAction::Loaded { ticket, items } => {
            if !state.is_current(ticket) {
                tracing::warn!(
                    restaurant_id = ticket.restaurant_id,
                    "Discarding stale layout response"
                );
                return state;
            }
            state.restaurant_id = Some(ticket.restaurant_id);
            state.items = items;
            state.dirty = false;
        }
        LayoutAction::Replaced(items) => {
            state.items = items;
            state.dirty = true;
        }
        LayoutAction::Add(item) => {
            state.items.push(item);
            state.dirty = true;
        }
        LayoutAction::Update { id, patch } => {
            if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
                patch.apply(item);
                state.dirty = true;
            }
        }
        LayoutAction::Remove(id) => {
            let before = state.items.len();
            state.items.retain(|item| item.id != id);
            if state.items.len() != before {
                state.dirty = true;
            }
        }
        LayoutAction::Saved => {
            state.dirty = false;
        }
    }
    state
}

/// Owner of the editor's layout state
#[derive(Debug, Default)]
pub struct LayoutStore {
    state: LayoutState,
    last_provisional: i64,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn items(&self) -> &[LayoutItem] {
        self.state.items()
    }

    pub fn get(&self, id: ItemId) -> Option<&LayoutItem> {
        self.state.get(id)
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn restaurant_id(&self) -> Option<i64> {
        self.state.restaurant_id()
    }

    pub fn dispatch(&mut self, action: LayoutAction) {
        tracing::debug!(?action, "Layout action");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    pub fn begin_load(&mut self, restaurant_id: i64) -> LoadTicket {
        self.state.begin_load(restaurant_id)
    }

    /// Apply a completed load. Returns `false` if the ticket was stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, items: Vec<LayoutItem>) -> bool {
        let current = self.state.is_current(ticket);
        self.dispatch(LayoutAction::Loaded { ticket, items });
        current
    }

    /// Timestamp-based id, strictly increasing within this store
    fn next_provisional_id(&mut self) -> ItemId {
        let id = now_millis().max(self.last_provisional + 1);
        self.last_provisional = id;
        ItemId::Provisional(id)
    }

    /// Append a new item at the default position. Local only until saved.
    pub fn add_item(&mut self, new_item: NewItem) -> ItemId {
        let id = self.next_provisional_id();
        let kind = match new_item {
            NewItem::Table {
                table_type,
                capacity,
                shape,
            } => ItemKind::Table(TableSpec {
                table_number: self.state.next_table_number(),
                table_type,
                capacity,
                shape,
            }),
            NewItem::Furniture {
                name,
                width,
                height,
                color,
            } => ItemKind::Furniture(FurnitureSpec {
                name: name.unwrap_or_else(|| {
                    format!("Furniture {}", self.state.furniture_count() + 1)
                }),
                width,
                height,
                color,
            }),
        };
        self.dispatch(LayoutAction::Add(LayoutItem {
            id,
            x_coordinate: NEW_ITEM_POSITION,
            y_coordinate: NEW_ITEM_POSITION,
            kind,
        }));
        id
    }

    pub fn update_item(&mut self, id: ItemId, patch: ItemPatch) {
        self.dispatch(LayoutAction::Update { id, patch });
    }

    pub fn remove_item(&mut self, id: ItemId) {
        self.dispatch(LayoutAction::Remove(id));
    }

    pub fn replace_all(&mut self, items: Vec<LayoutItem>) {
        self.dispatch(LayoutAction::Replaced(items));
    }

    pub fn mark_saved(&mut self) {
        self.dispatch(LayoutAction::Saved);
    }
}
