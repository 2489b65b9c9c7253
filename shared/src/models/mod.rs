//! Data models
//!
//! Wire types exchanged with the restaurant backend. All server ids are `i64`.

pub mod availability;
pub mod booking;
pub mod layout_item;
pub mod restaurant;
pub mod user;

// Re-exports
pub use availability::*;
pub use booking::*;
pub use layout_item::*;
pub use restaurant::*;
pub use user::*;
