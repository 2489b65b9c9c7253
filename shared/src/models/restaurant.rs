//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity, as listed and shown in page headers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub cuisine: String,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub average_price: Option<f64>,
    /// `HH:MM`
    #[serde(default)]
    pub opening_time: Option<String>,
    /// `HH:MM`
    #[serde(default)]
    pub closing_time: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Restaurant {
    /// `"location • cuisine"` subtitle used under the restaurant name
    pub fn subtitle(&self) -> String {
        format!("{} • {}", self.location, self.cuisine)
    }
}
