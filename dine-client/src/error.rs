//! Client error types

use dine_floor::ValidationError;
use thiserror::Error;

pub const LOAD_FALLBACK: &str = "Failed to load layout.";
pub const SAVE_FALLBACK: &str = "Failed to save layout.";
pub const BOOKING_FALLBACK: &str = "Booking failed.";
pub const SUGGEST_FALLBACK: &str = "Failed to get layout suggestion.";
pub const NOT_LOADED: &str = "No layout loaded.";

/// Transport and protocol errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status; `message` is the server's `error` field when present
    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// The backend's own message, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// User-facing failures of the editor and booking sessions
///
/// `Load` is shown as a blocking page alert, `Save` and `Booking` as
/// dismissible alerts with local state kept, `Validation` never reached
/// the server.
#[derive(Debug, Error)]
pub enum FloorPlanError {
    #[error("{message}")]
    Load {
        message: String,
        source: Option<ClientError>,
    },

    #[error("{message}")]
    Save {
        message: String,
        source: Option<ClientError>,
    },

    #[error("{message}")]
    Booking {
        message: String,
        source: Option<ClientError>,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl FloorPlanError {
    pub fn load(err: ClientError) -> Self {
        Self::Load {
            message: message_or(&err, LOAD_FALLBACK),
            source: Some(err),
        }
    }

    pub fn save(err: ClientError) -> Self {
        Self::Save {
            message: message_or(&err, SAVE_FALLBACK),
            source: Some(err),
        }
    }

    pub fn booking(err: ClientError) -> Self {
        Self::Booking {
            message: message_or(&err, BOOKING_FALLBACK),
            source: Some(err),
        }
    }

    /// Layout suggestion request failed
    pub fn suggest(err: ClientError) -> Self {
        Self::Load {
            message: message_or(&err, SUGGEST_FALLBACK),
            source: Some(err),
        }
    }

    /// Save attempted before any layout was loaded
    pub fn save_not_loaded() -> Self {
        Self::Save {
            message: NOT_LOADED.to_string(),
            source: None,
        }
    }

    /// Server-side edit attempted before any layout was loaded
    pub fn not_loaded() -> Self {
        Self::Load {
            message: NOT_LOADED.to_string(),
            source: None,
        }
    }

    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load { .. })
    }

    pub fn is_save(&self) -> bool {
        matches!(self, Self::Save { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Server message verbatim, else the generic fallback
fn message_or(err: &ClientError, fallback: &str) -> String {
    err.server_message().unwrap_or(fallback).to_string()
}
