//! Booking Model

use serde::{Deserialize, Serialize};

/// Create booking payload (`POST /bookings`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub user_id: i64,
    pub restaurant_id: i64,
    /// Local `YYYY-MM-DDTHH:mm`, as entered by the guest
    pub date: String,
    /// Layout id of the booked table
    pub layout_id: i64,
    pub table_number: i32,
    pub num_guests: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}
