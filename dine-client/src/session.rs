//! Session data
//!
//! Explicit session handed to clients at construction time. Signing in is
//! handled elsewhere; this only carries the outcome.

use shared::models::UserInfo;

/// Session data held for the client's lifetime
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Bearer token for HTTP API authentication
    token: Option<String>,
    /// Signed-in user
    user: Option<UserInfo>,
}

impl Session {
    /// Creates an anonymous session
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Token-only session, user unknown
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
        }
    }

    pub fn with_user(mut self, user: UserInfo) -> Self {
        self.user = Some(user);
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }
}
