//! API Response types
//!
//! The backend wraps every payload in the same envelope:
//! ```json
//! { "data": { ... }, "error": null }
//! ```
//! A few endpoints (booking creation) answer with a bare
//! `{"message": "..."}` or `{"error": "..."}` instead, so every field is
//! optional.

use serde::{Deserialize, Serialize};

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Response data (absent on errors)
    pub data: Option<T>,
    /// Server-provided error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Top-level message used by endpoints that skip `data`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Take the payload, or the server's error message when there is none
    pub fn into_data(self) -> Result<T, Option<String>> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(self.error),
        }
    }
}

/// `{"message": "..."}` payload returned by write endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}
