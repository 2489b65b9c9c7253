//! Restaurant backend API
//!
//! [`LayoutBackend`] is the seam the editor and booking sessions talk to;
//! [`ApiClient`] implements it over any [`HttpClient`].

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{AvailabilityPayload, BookingRequest, LayoutItem, Restaurant};
use shared::{ApiEnvelope, MessageBody};

use crate::{ClientError, ClientResult, HttpClient};

/// Remote operations used by the floor-plan sessions
#[async_trait]
pub trait LayoutBackend: Send + Sync {
    /// GET /restaurants
    async fn restaurants(&self) -> ClientResult<Vec<Restaurant>>;
    /// GET /restaurants/{id}
    async fn restaurant(&self, restaurant_id: i64) -> ClientResult<Restaurant>;
    /// GET /restaurants/{id}/layout
    async fn layout(&self, restaurant_id: i64) -> ClientResult<Vec<LayoutItem>>;
    /// PUT /restaurants/{id}/layout, replacing the whole collection
    async fn replace_layout(
        &self,
        restaurant_id: i64,
        items: &[LayoutItem],
    ) -> ClientResult<String>;
    /// POST /restaurants/{id}/suggest-layout
    async fn suggest_layout(&self, restaurant_id: i64) -> ClientResult<Vec<LayoutItem>>;
    /// GET /bookings/availability, `utc_date` as `YYYY-MM-DDTHH:mm`
    async fn availability(
        &self,
        restaurant_id: i64,
        utc_date: &str,
    ) -> ClientResult<AvailabilityPayload>;
    /// POST /bookings
    async fn create_booking(&self, request: &BookingRequest) -> ClientResult<String>;
}

#[derive(Serialize)]
struct LayoutBody<'a> {
    layout: &'a [LayoutItem],
}

#[derive(Serialize)]
struct AvailabilityParams<'a> {
    restaurant_id: i64,
    date: &'a str,
}

/// Typed API client
#[derive(Debug, Clone)]
pub struct ApiClient<C> {
    http: C,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }
}

/// Unwrap `{data: ...}`
fn into_data<T>(envelope: ApiEnvelope<T>, what: &str) -> ClientResult<T> {
    envelope.into_data().map_err(|error| {
        ClientError::InvalidResponse(error.unwrap_or_else(|| format!("Missing {what} data")))
    })
}

/// Write endpoints answer `{data: {message}}` or a bare `{message}`
fn into_message(envelope: ApiEnvelope<MessageBody>) -> String {
    match envelope {
        ApiEnvelope {
            data: Some(body), ..
        } => body.message,
        ApiEnvelope {
            message: Some(message),
            ..
        } => message,
        _ => String::new(),
    }
}

impl<C: HttpClient> ApiClient<C> {
    async fn get_data<T: DeserializeOwned>(&self, path: &str, what: &str) -> ClientResult<T> {
        let envelope: ApiEnvelope<T> = self.http.get(path).await?;
        into_data(envelope, what)
    }
}

#[async_trait]
impl<C: HttpClient> LayoutBackend for ApiClient<C> {
    async fn restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        self.get_data("/restaurants", "restaurant list").await
    }

    async fn restaurant(&self, restaurant_id: i64) -> ClientResult<Restaurant> {
        self.get_data(&format!("/restaurants/{restaurant_id}"), "restaurant")
            .await
    }

    async fn layout(&self, restaurant_id: i64) -> ClientResult<Vec<LayoutItem>> {
        self.get_data(&format!("/restaurants/{restaurant_id}/layout"), "layout")
            .await
    }

    async fn replace_layout(
        &self,
        restaurant_id: i64,
        items: &[LayoutItem],
    ) -> ClientResult<String> {
        let envelope: ApiEnvelope<MessageBody> = self
            .http
            .put(
                &format!("/restaurants/{restaurant_id}/layout"),
                &LayoutBody { layout: items },
            )
            .await?;
        Ok(into_message(envelope))
    }

    async fn suggest_layout(&self, restaurant_id: i64) -> ClientResult<Vec<LayoutItem>> {
        let envelope: ApiEnvelope<Vec<LayoutItem>> = self
            .http
            .post_empty(&format!("/restaurants/{restaurant_id}/suggest-layout"))
            .await?;
        into_data(envelope, "suggested layout")
    }

    async fn availability(
        &self,
        restaurant_id: i64,
        utc_date: &str,
    ) -> ClientResult<AvailabilityPayload> {
        let params = AvailabilityParams {
            restaurant_id,
            date: utc_date,
        };
        let envelope: ApiEnvelope<AvailabilityPayload> =
            self.http.get_query("/bookings/availability", &params).await?;
        into_data(envelope, "availability")
    }

    async fn create_booking(&self, request: &BookingRequest) -> ClientResult<String> {
        let envelope: ApiEnvelope<MessageBody> = self.http.post("/bookings", request).await?;
        Ok(into_message(envelope))
    }
}
