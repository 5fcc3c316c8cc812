//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Register request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
}

/// User information embedded in auth responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub username: String,
    /// First assigned role name, if any
    pub role: Option<String>,
}

/// Current user response (`GET /api/me`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user: UserInfo,
    pub role: Option<String>,
    /// Effective permission names (direct grants plus role grants)
    pub permissions: Vec<String>,
}

/// Token response (`POST /api/refresh`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Grant or revoke direct permissions on a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncPermissionsRequest {
    pub permissions: Vec<String>,
    /// true to grant, false to revoke
    pub assign: bool,
}
