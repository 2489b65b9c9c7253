//! Availability-Aware Selector
//!
//! Gates table selection on the server's availability set for the current
//! `(restaurant, date)` query. Unknown or failed availability means nothing
//! is selectable.

use shared::models::{AvailabilitySet, ItemId, LayoutItem};

/// Availability query key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub restaurant_id: i64,
    /// UTC `YYYY-MM-DDTHH:mm`
    pub date: String,
}

/// How an item should be presented in the seat picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    /// Decorative, never selectable
    Furniture,
    Available,
    Unavailable,
    Selected,
}

#[derive(Debug, Default)]
pub struct AvailabilitySelector {
    query: Option<AvailabilityQuery>,
    availability: Option<AvailabilitySet>,
    selected: Option<ItemId>,
}

impl AvailabilitySelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> Option<&AvailabilityQuery> {
        self.query.as_ref()
    }

    /// Point the selector at a new query.
    ///
    /// A different restaurant or date clears the selection and the current
    /// set; selection stays disabled until a set for the new query is
    /// applied. Returns `true` if the query changed.
    pub fn set_query(&mut self, restaurant_id: i64, date: impl Into<String>) -> bool {
        let query = AvailabilityQuery {
            restaurant_id,
            date: date.into(),
        };
        if self.query.as_ref() == Some(&query) {
            return false;
        }
        tracing::debug!(restaurant_id, date = %query.date, "Availability query changed");
        self.query = Some(query);
        self.availability = None;
        self.selected = None;
        true
    }

    /// Install a fetched set. Sets for any other query are discarded.
    ///
    /// Returns `false` if the set was stale.
    pub fn apply(&mut self, set: AvailabilitySet) -> bool {
        let matches = self
            .query
            .as_ref()
            .is_some_and(|q| set.is_for(q.restaurant_id, &q.date));
        if !matches {
            tracing::warn!(
                restaurant_id = set.restaurant_id,
                date = %set.date,
                "Discarding availability for a superseded query"
            );
            return false;
        }
        if let Some(selected) = self.selected
            && !set.contains(selected)
        {
            self.selected = None;
        }
        self.availability = Some(set);
        true
    }

    /// Fetch failed: fail closed with an empty set
    pub fn apply_failure(&mut self, restaurant_id: i64, date: &str) -> bool {
        self.apply(AvailabilitySet::empty(restaurant_id, date))
    }

    /// No set for the current query yet
    pub fn is_stale(&self) -> bool {
        self.availability.is_none()
    }

    pub fn availability(&self) -> Option<&AvailabilitySet> {
        self.availability.as_ref()
    }

    /// Tables in the current set only; furniture never
    pub fn is_selectable(&self, item: &LayoutItem) -> bool {
        item.is_table()
            && self
                .availability
                .as_ref()
                .is_some_and(|set| set.contains(item.id))
    }

    /// Select the item with `id` if it is selectable; otherwise leave the
    /// selection as it was. Returns whether the selection was taken.
    pub fn select(&mut self, items: &[LayoutItem], id: ItemId) -> bool {
        match items.iter().find(|item| item.id == id) {
            Some(item) if self.is_selectable(item) => {
                self.selected = Some(id);
                true
            }
            _ => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn selected_item<'a>(&self, items: &'a [LayoutItem]) -> Option<&'a LayoutItem> {
        let id = self.selected?;
        items.iter().find(|item| item.id == id)
    }

    pub fn status(&self, item: &LayoutItem) -> SeatStatus {
        if !item.is_table() {
            SeatStatus::Furniture
        } else if self.selected == Some(item.id) {
            SeatStatus::Selected
        } else if self.is_selectable(item) {
            SeatStatus::Available
        } else {
            SeatStatus::Unavailable
        }
    }

    pub fn selectable<'a>(
        &'a self,
        items: &'a [LayoutItem],
    ) -> impl Iterator<Item = &'a LayoutItem> + 'a {
        items.iter().filter(|item| self.is_selectable(item))
    }
}
