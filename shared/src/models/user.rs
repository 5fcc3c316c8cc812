//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity (用户)
///
/// `password_hash` is never serialized into API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete stamp: `None` = active, `Some` = disabled
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the user is visible in default listings
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// User plus assigned role names, as returned by the user endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithRoles {
    #[serde(flatten)]
    pub user: User,
    pub roles: Vec<String>,
}

/// Create user payload (register and admin create)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
    /// Existing role name to assign on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Update user payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
    /// When present, replaces the user's role set with this single role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
