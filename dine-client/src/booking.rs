//! Booking session
//!
//! Guest-side seat picker: shows a restaurant's floor plan, marks which
//! tables are free at the chosen time and books the selected one.

use dine_floor::validation::validate_guests;
use dine_floor::{AvailabilitySelector, SeatStatus, ValidationError};
use shared::models::{AvailabilitySet, BookingRequest, ItemId, LayoutItem, Restaurant};
use shared::util::{host_local_to_utc_query, local_to_utc_query};

use crate::error::FloorPlanError;
use crate::{LayoutBackend, Session};

pub struct BookingPicker<B> {
    backend: B,
    session: Session,
    /// Fixed UTC minus local time, minutes; `None` uses the host zone per date
    offset_minutes: Option<i32>,
    restaurant: Option<Restaurant>,
    layout: Vec<LayoutItem>,
    selector: AvailabilitySelector,
    /// As entered, local `YYYY-MM-DDTHH:mm`
    local_date: Option<String>,
}

impl<B: LayoutBackend> BookingPicker<B> {
    /// Dates are converted with the host timezone's offset on each date
    pub fn new(backend: B, session: Session) -> Self {
        Self::build(backend, session, None)
    }

    /// Fixed timezone offset (UTC minus local, minutes) instead of the host's
    pub fn with_offset_minutes(backend: B, session: Session, offset_minutes: i32) -> Self {
        Self::build(backend, session, Some(offset_minutes))
    }

    fn build(backend: B, session: Session, offset_minutes: Option<i32>) -> Self {
        Self {
            backend,
            session,
            offset_minutes,
            restaurant: None,
            layout: Vec::new(),
            selector: AvailabilitySelector::new(),
            local_date: None,
        }
    }

    fn utc_date(&self, local: &str) -> Result<String, ValidationError> {
        let utc = match self.offset_minutes {
            Some(offset) => local_to_utc_query(local, offset),
            None => host_local_to_utc_query(local),
        };
        Ok(utc?)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn restaurant(&self) -> Option<&Restaurant> {
        self.restaurant.as_ref()
    }

    pub fn items(&self) -> &[LayoutItem] {
        &self.layout
    }

    pub fn local_date(&self) -> Option<&str> {
        self.local_date.as_deref()
    }

    pub fn availability(&self) -> Option<&AvailabilitySet> {
        self.selector.availability()
    }

    /// Open a restaurant's floor plan. Selection never survives a
    /// restaurant change.
    pub async fn load(&mut self, restaurant_id: i64) -> Result<(), FloorPlanError> {
        let (restaurant, layout) = tokio::try_join!(
            self.backend.restaurant(restaurant_id),
            self.backend.layout(restaurant_id),
        )
        .map_err(|e| {
            tracing::warn!(restaurant_id, status = ?e.status(), error = %e, "Failed to load floor plan");
            FloorPlanError::load(e)
        })?;

        if self.restaurant.as_ref().map(|r| r.id) != Some(restaurant_id) {
            self.selector.clear_selection();
        }
        self.restaurant = Some(restaurant);
        self.layout = layout;

        if self.local_date.is_some() {
            self.refresh_availability().await?;
        }
        Ok(())
    }

    /// Choose the booking time, local `YYYY-MM-DDTHH:mm`, and fetch
    /// availability for it
    pub async fn set_date(&mut self, local: &str) -> Result<(), FloorPlanError> {
        self.utc_date(local)?;
        self.local_date = Some(local.trim().to_string());
        self.refresh_availability().await
    }

    /// Re-query availability for the current restaurant and date.
    ///
    /// A failed fetch leaves nothing selectable and is reported as a load
    /// error.
    pub async fn refresh_availability(&mut self) -> Result<(), FloorPlanError> {
        let (Some(restaurant_id), Some(local)) =
            (self.restaurant.as_ref().map(|r| r.id), self.local_date.as_deref())
        else {
            return Ok(());
        };
        let utc = self.utc_date(local)?;
        self.selector.set_query(restaurant_id, utc.clone());

        match self.backend.availability(restaurant_id, &utc).await {
            Ok(payload) => {
                let set = AvailabilitySet::from_payload(restaurant_id, utc, payload);
                tracing::debug!(restaurant_id, available = set.len(), "Availability loaded");
                self.selector.apply(set);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(restaurant_id, status = ?e.status(), error = %e, "Failed to load availability");
                self.selector.apply_failure(restaurant_id, &utc);
                Err(FloorPlanError::load(e))
            }
        }
    }

    pub fn is_selectable(&self, item: &LayoutItem) -> bool {
        self.selector.is_selectable(item)
    }

    pub fn status(&self, item: &LayoutItem) -> SeatStatus {
        self.selector.status(item)
    }

    /// Select a table; unavailable tables and furniture are ignored
    pub fn select(&mut self, id: ItemId) -> bool {
        self.selector.select(&self.layout, id)
    }

    pub fn selected(&self) -> Option<&LayoutItem> {
        self.selector.selected_item(&self.layout)
    }

    /// Book the selected table for `num_guests`
    pub async fn book(
        &mut self,
        num_guests: u32,
        special_requests: Option<String>,
    ) -> Result<String, FloorPlanError> {
        let user_id = self.session.user_id().ok_or(ValidationError::NotSignedIn)?;
        let restaurant_id = self
            .restaurant
            .as_ref()
            .map(|r| r.id)
            .ok_or(ValidationError::NoTableSelected)?;
        let date = self
            .local_date
            .clone()
            .ok_or(ValidationError::NoTableSelected)?;
        let item = self.selected().ok_or(ValidationError::NoTableSelected)?;
        let table = item.as_table().ok_or(ValidationError::NoTableSelected)?;
        let layout_id = item.id.persisted().ok_or(ValidationError::NoTableSelected)?;
        validate_guests(num_guests, table)?;

        let request = BookingRequest {
            user_id,
            restaurant_id,
            date,
            layout_id,
            table_number: table.table_number,
            num_guests,
            special_requests,
        };

        let message = self.backend.create_booking(&request).await.map_err(|e| {
            tracing::warn!(restaurant_id, layout_id, status = ?e.status(), error = %e, "Booking failed");
            FloorPlanError::booking(e)
        })?;
        tracing::info!(restaurant_id, layout_id, num_guests, "Table booked");

        // The booked table is gone from the set now
        self.selector.clear_selection();
        if let Err(e) = self.refresh_availability().await {
            tracing::warn!(error = %e, "Availability refresh after booking failed");
        }
        Ok(message)
    }
}
