//! Dine Client - HTTP client for the restaurant backend
//!
//! Typed REST calls plus the two sessions built on the floor-plan engine:
//! - [`LayoutEditor`]: load, edit, drag and save a restaurant layout
//! - [`BookingPicker`]: pick an available table for a date and book it

pub mod api;
pub mod booking;
pub mod config;
pub mod editor;
pub mod error;
pub mod http;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, LayoutBackend};
pub use booking::BookingPicker;
pub use config::ClientConfig;
pub use editor::{LayoutEditor, LoadedLayout};
pub use error::{ClientError, ClientResult, FloorPlanError};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::Session;

// Re-export shared types for convenience
pub use shared::{ApiEnvelope, MessageBody};
