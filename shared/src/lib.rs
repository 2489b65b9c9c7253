//! Shared types for the Dine workspace
//!
//! Wire models exchanged with the restaurant backend, the response
//! envelope, and small time/id utilities used by both the floor-plan
//! engine and the HTTP client.

pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    AvailabilityPayload, AvailabilitySet, BookingRequest, FurnitureSpec, ItemId, ItemKind, LayoutItem, Restaurant,
    TableShape, TableSpec, TableType, UserInfo,
};
pub use response::{ApiEnvelope, MessageBody};
