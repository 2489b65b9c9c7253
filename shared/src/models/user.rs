//! User Model

use serde::{Deserialize, Serialize};

/// Signed-in user, as returned by the profile endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}
