//! Permission Model

use serde::{Deserialize, Serialize};

/// Permission entity (权限) - atomic named capability, never composed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Permission {
    pub id: i64,
    pub name: String,
}

/// Create permission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionCreate {
    pub name: String,
}

/// Update permission payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
