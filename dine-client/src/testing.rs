//! In-memory backend for unit tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use shared::models::{
    AvailabilityPayload, BookingRequest, FurnitureSpec, ItemId, ItemKind, LayoutItem, Restaurant,
    TableShape, TableSpec, TableType,
};

use crate::{ClientError, ClientResult, LayoutBackend};

pub fn table(id: i64, number: i32) -> LayoutItem {
    LayoutItem {
        id: ItemId::Persisted(id),
        x_coordinate: 10.0,
        y_coordinate: 10.0,
        kind: ItemKind::Table(TableSpec {
            table_number: number,
            table_type: TableType::Standard,
            capacity: 4,
            shape: TableShape::Rectangle,
        }),
    }
}

pub fn bar(id: i64) -> LayoutItem {
    LayoutItem {
        id: ItemId::Persisted(id),
        x_coordinate: 80.0,
        y_coordinate: 20.0,
        kind: ItemKind::Furniture(FurnitureSpec {
            name: "Bar".into(),
            width: 15.0,
            height: 8.0,
            color: "#4a5568".into(),
        }),
    }
}

pub fn restaurant(id: i64) -> Restaurant {
    Restaurant {
        id,
        name: "Testaurant".into(),
        location: "Main St".into(),
        cuisine: "Italian".into(),
        capacity: Some(40),
        average_price: None,
        opening_time: None,
        closing_time: None,
        image_url: None,
    }
}

#[derive(Default)]
struct State {
    layouts: HashMap<i64, Vec<LayoutItem>>,
    availability: HashMap<(i64, String), Vec<i64>>,
    suggestion: Vec<LayoutItem>,
    load_error: Option<String>,
    save_error: Option<String>,
    availability_error: bool,
    suggest_error: bool,
    booking_error: Option<String>,
    next_id: i64,
    saved_bodies: Vec<serde_json::Value>,
    availability_queries: Vec<(i64, String)>,
    bookings: Vec<BookingRequest>,
}

/// Behaves like the real backend: `{data}` payloads, server-assigned ids
/// for items posted without one.
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1000,
                ..Default::default()
            }),
        }
    }

    pub fn set_layout(&self, restaurant_id: i64, items: Vec<LayoutItem>) {
        self.state
            .lock()
            .unwrap()
            .layouts
            .insert(restaurant_id, items);
    }

    pub fn set_availability(&self, restaurant_id: i64, utc_date: &str, tables: Vec<i64>) {
        self.state
            .lock()
            .unwrap()
            .availability
            .insert((restaurant_id, utc_date.to_string()), tables);
    }

    pub fn set_suggestion(&self, items: Vec<LayoutItem>) {
        self.state.lock().unwrap().suggestion = items;
    }

    pub fn fail_loads(&self, message: &str) {
        self.state.lock().unwrap().load_error = Some(message.to_string());
    }

    pub fn fail_saves(&self, message: &str) {
        self.state.lock().unwrap().save_error = Some(message.to_string());
    }

    pub fn fail_availability(&self, fail: bool) {
        self.state.lock().unwrap().availability_error = fail;
    }

    pub fn fail_suggestions(&self) {
        self.state.lock().unwrap().suggest_error = true;
    }

    pub fn fail_bookings(&self, message: &str) {
        self.state.lock().unwrap().booking_error = Some(message.to_string());
    }

    pub fn last_saved_body(&self) -> Option<serde_json::Value> {
        self.state.lock().unwrap().saved_bodies.last().cloned()
    }

    pub fn availability_queries(&self) -> Vec<(i64, String)> {
        self.state.lock().unwrap().availability_queries.clone()
    }

    pub fn bookings(&self) -> Vec<BookingRequest> {
        self.state.lock().unwrap().bookings.clone()
    }
}

fn api_error(status: u16, message: &str) -> ClientError {
    ClientError::Api {
        status,
        message: Some(message.to_string()),
    }
}

#[async_trait]
impl LayoutBackend for FakeBackend {
    async fn restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        let state = self.state.lock().unwrap();
        let mut ids: Vec<_> = state.layouts.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids.into_iter().map(restaurant).collect())
    }

    async fn restaurant(&self, restaurant_id: i64) -> ClientResult<Restaurant> {
        let state = self.state.lock().unwrap();
        if let Some(message) = &state.load_error {
            return Err(api_error(404, message));
        }
        Ok(restaurant(restaurant_id))
    }

    async fn layout(&self, restaurant_id: i64) -> ClientResult<Vec<LayoutItem>> {
        let state = self.state.lock().unwrap();
        if let Some(message) = &state.load_error {
            return Err(api_error(404, message));
        }
        Ok(state.layouts.get(&restaurant_id).cloned().unwrap_or_default())
    }

    async fn replace_layout(
        &self,
        restaurant_id: i64,
        items: &[LayoutItem],
    ) -> ClientResult<String> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.save_error {
            return Err(api_error(403, message));
        }
        // Go through the wire format, as the real server would
        let body = serde_json::json!({ "layout": items });
        state.saved_bodies.push(body.clone());

        let mut stored = Vec::new();
        for mut value in body["layout"].as_array().cloned().unwrap_or_default() {
            if value.get("id").is_none() {
                state.next_id += 1;
                value["id"] = state.next_id.into();
            }
            stored.push(serde_json::from_value::<LayoutItem>(value)?);
        }
        state.layouts.insert(restaurant_id, stored);
        Ok("Layout updated successfully".to_string())
    }

    async fn suggest_layout(&self, _restaurant_id: i64) -> ClientResult<Vec<LayoutItem>> {
        let state = self.state.lock().unwrap();
        if state.suggest_error {
            return Err(ClientError::Api {
                status: 500,
                message: None,
            });
        }
        Ok(state.suggestion.clone())
    }

    async fn availability(
        &self,
        restaurant_id: i64,
        utc_date: &str,
    ) -> ClientResult<AvailabilityPayload> {
        let mut state = self.state.lock().unwrap();
        state
            .availability_queries
            .push((restaurant_id, utc_date.to_string()));
        if state.availability_error {
            return Err(ClientError::Api {
                status: 500,
                message: None,
            });
        }
        let available_tables = state
            .availability
            .get(&(restaurant_id, utc_date.to_string()))
            .cloned()
            .unwrap_or_default();
        Ok(AvailabilityPayload { available_tables })
    }

    async fn create_booking(&self, request: &BookingRequest) -> ClientResult<String> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.booking_error {
            return Err(api_error(409, message));
        }
        state.bookings.push(request.clone());
        Ok("Booking successful, email sent!".to_string())
    }
}
