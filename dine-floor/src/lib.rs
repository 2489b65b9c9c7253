//! Dine Floor - floor-plan engine
//!
//! IO-free core of the layout editor and the booking seat picker:
//! - [`geometry`]: item placement and seat rings around tables
//! - [`store`]: reducer-style layout state with provisional ids
//! - [`drag`]: pointer deltas to clamped percentage coordinates
//! - [`selector`]: availability-gated table selection

pub mod drag;
pub mod geometry;
pub mod selector;
pub mod store;
pub mod validation;

pub use drag::{CanvasSize, DragController, PixelDelta, REFERENCE_CANVAS};
pub use geometry::{
    CanvasPosition, Footprint, SeatOffset, SeatPositions, canvas_position, seat_positions,
};
pub use selector::{AvailabilityQuery, AvailabilitySelector, SeatStatus};
pub use store::{
    ItemPatch, LayoutAction, LayoutState, LayoutStore, LoadTicket, NewItem, reduce,
};
pub use validation::ValidationError;

// Re-export shared model types for convenience
pub use shared::models::{
    AvailabilitySet, FurnitureSpec, ItemId, ItemKind, LayoutItem, TableShape, TableSpec, TableType,
};
