//! Availability Model

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ItemId;

/// Wire payload of `GET /bookings/availability`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityPayload {
    /// Layout ids of bookable tables
    #[serde(default)]
    pub available_tables: Vec<i64>,
}

/// Bookable table ids for one `(restaurant_id, date)` query
///
/// Only meaningful for the query it was fetched with; a new date or
/// restaurant needs a fresh set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySet {
    pub restaurant_id: i64,
    /// UTC `YYYY-MM-DDTHH:mm` sent to the server
    pub date: String,
    tables: BTreeSet<i64>,
}

impl AvailabilitySet {
    pub fn new(
        restaurant_id: i64,
        date: impl Into<String>,
        tables: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self {
            restaurant_id,
            date: date.into(),
            tables: tables.into_iter().collect(),
        }
    }

    /// Empty set for a query; used when the fetch failed
    pub fn empty(restaurant_id: i64, date: impl Into<String>) -> Self {
        Self::new(restaurant_id, date, [])
    }

    pub fn from_payload(
        restaurant_id: i64,
        date: impl Into<String>,
        payload: AvailabilityPayload,
    ) -> Self {
        Self::new(restaurant_id, date, payload.available_tables)
    }

    /// Whether the query key matches this set
    pub fn is_for(&self, restaurant_id: i64, date: &str) -> bool {
        self.restaurant_id == restaurant_id && self.date == date
    }

    /// Provisional items are never bookable
    pub fn contains(&self, id: ItemId) -> bool {
        id.persisted().is_some_and(|id| self.tables.contains(&id))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.tables.iter().copied()
    }
}
