//! Permission API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::models::{Permission, PermissionCreate, PermissionUpdate};

use crate::core::ServerState;
use crate::db::repository::permission;
use crate::security_log;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// GET /api/permissions - 全部权限
pub async fn index(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Permission>>>> {
    let permissions = permission::find_all(&state.pool).await?;
    Ok(ok(permissions))
}

/// GET /api/permissions/:id - 按 ID 查询权限
pub async fn show(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Permission>>> {
    let found = permission::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Permission {id}")))?;
    Ok(ok(found))
}

/// POST /api/permissions - 创建权限 (重名 409)
pub async fn store(
    State(state): State<ServerState>,
    Json(payload): Json<PermissionCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Permission>>)> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("permission name must not be empty"));
    }

    let created = permission::create(&state.pool, payload).await?;

    security_log!(
        "INFO",
        "permission_created",
        permission_id = created.id,
        name = created.name.clone()
    );

    Ok((StatusCode::CREATED, ok(created)))
}

/// PUT /api/permissions/:id - 重命名权限 (保持唯一)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PermissionUpdate>,
) -> AppResult<Json<AppResponse<Permission>>> {
    if let Some(name) = &payload.name
        && name.trim().is_empty()
    {
        return Err(AppError::validation("permission name must not be empty"));
    }

    let updated = permission::update(&state.pool, id, payload).await?;
    Ok(ok(updated))
}

/// DELETE /api/permissions/:id - 删除权限
///
/// 级联清掉所有角色授权和用户直接授权。
pub async fn destroy(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    permission::delete(&state.pool, id).await?;
    security_log!("WARN", "permission_deleted", permission_id = id);
    Ok(ok_with_message((), "Permission deleted successfully"))
}
