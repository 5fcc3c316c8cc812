//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::client::SyncPermissionsRequest;
use shared::models::{UserCreate, UserUpdate, UserWithRoles};

use crate::auth::hash_password;
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::validation::{
    MAX_DISPLAY_NAME_LEN, MAX_USERNAME_LEN, MIN_DISPLAY_NAME_LEN, MIN_USERNAME_LEN,
    validate_optional_text, validate_password, validate_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// GET /api/users - 活跃用户列表
pub async fn index(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<UserWithRoles>>>> {
    let users = user::find_all_active(&state.pool).await?;
    Ok(ok(users))
}

/// GET /api/users/disabled - 已禁用用户列表
///
/// 空列表返回 200 和说明性消息。
pub async fn index_disabled(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<UserWithRoles>>>> {
    let users = user::find_all_disabled(&state.pool).await?;
    if users.is_empty() {
        return Ok(ok_with_message(users, "No disabled users found"));
    }
    Ok(ok(users))
}

/// GET /api/users/:id - 按 ID 查询活跃用户
pub async fn show(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<UserWithRoles>>> {
    let found = user::find_active_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id}")))?;
    Ok(ok(found))
}

/// GET /api/users/trashed/:id - 按 ID 查询已禁用用户
pub async fn show_trashed(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<UserWithRoles>>> {
    let found = user::find_trashed_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Disabled user {id}")))?;
    Ok(ok(found))
}

/// GET /api/users/name/:name - 按显示名模糊查找活跃用户
///
/// 没有任何匹配时返回 404。
pub async fn show_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> AppResult<Json<AppResponse<Vec<UserWithRoles>>>> {
    let users = user::search_by_name(&state.pool, &name).await?;
    if users.is_empty() {
        return Err(AppError::not_found(format!("No users named '{name}'")));
    }
    Ok(ok(users))
}

/// POST /api/users - 创建用户，可选分配已存在的角色
pub async fn store(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<UserWithRoles>>)> {
    validate_text(&payload.name, "name", MIN_DISPLAY_NAME_LEN, MAX_DISPLAY_NAME_LEN)?;
    validate_text(
        &payload.username,
        "username",
        MIN_USERNAME_LEN,
        MAX_USERNAME_LEN,
    )?;
    validate_password(&payload.password, &payload.password_confirmation)?;

    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let created = user::create(
        &state.pool,
        &payload.name,
        &payload.username,
        &password_hash,
        payload.role.as_deref(),
    )
    .await?;

    security_log!(
        "INFO",
        "user_created",
        user_id = created.user.id,
        username = created.user.username.clone()
    );

    Ok((StatusCode::CREATED, ok(created)))
}

/// PATCH /api/users/:id - 部分更新活跃用户
///
/// `role` 出现时替换用户的整个角色集合；密码更新要求确认字段。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<AppResponse<UserWithRoles>>> {
    validate_optional_text(
        &payload.name,
        "name",
        MIN_DISPLAY_NAME_LEN,
        MAX_DISPLAY_NAME_LEN,
    )?;
    validate_optional_text(
        &payload.username,
        "username",
        MIN_USERNAME_LEN,
        MAX_USERNAME_LEN,
    )?;

    let password_hash = match &payload.password {
        Some(password) => {
            let confirmation = payload.password_confirmation.as_deref().unwrap_or("");
            validate_password(password, confirmation)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?,
            )
        }
        None => None,
    };

    let updated = user::update(
        &state.pool,
        id,
        payload.name.as_deref(),
        payload.username.as_deref(),
        password_hash.as_deref(),
        payload.role.as_deref(),
    )
    .await?;

    Ok(ok(updated))
}

/// PATCH /api/users/:id/permissions - 授予或收回直接权限
///
/// all-or-nothing：任何一个未知权限名都整体拒绝。
pub async fn sync_permissions(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SyncPermissionsRequest>,
) -> AppResult<Json<AppResponse<UserWithRoles>>> {
    if payload.permissions.is_empty() {
        return Err(AppError::validation("permissions must not be empty"));
    }

    let updated =
        user::sync_permissions(&state.pool, id, &payload.permissions, payload.assign).await?;

    security_log!(
        "INFO",
        "user_permissions_synced",
        user_id = id,
        assign = payload.assign,
        permissions = payload.permissions.join(",")
    );

    let message = if payload.assign {
        "Permissions granted successfully"
    } else {
        "Permissions revoked successfully"
    };
    Ok(ok_with_message(updated, message))
}

/// DELETE /api/users/:id - 软删除 (仅活跃用户)
pub async fn destroy(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    user::soft_delete(&state.pool, id).await?;
    security_log!("INFO", "user_disabled", user_id = id);
    Ok(ok_with_message((), "User disabled successfully"))
}

/// PATCH /api/users/restore/:id - 恢复已禁用用户
pub async fn restore(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    user::restore(&state.pool, id).await?;
    security_log!("INFO", "user_restored", user_id = id);
    Ok(ok_with_message((), "User restored successfully"))
}

/// DELETE /api/users/force/:id - 彻底删除 (仅已禁用用户)
pub async fn force_delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    user::force_delete(&state.pool, id).await?;
    security_log!("WARN", "user_purged", user_id = id);
    Ok(ok_with_message((), "User permanently deleted"))
}
