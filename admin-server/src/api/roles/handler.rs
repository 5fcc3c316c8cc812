//! Role API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::models::{RoleCreate, RoleUpdate, RoleWithPermissions};

use crate::core::ServerState;
use crate::db::repository::role;
use crate::security_log;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// GET /api/roles - 全部角色 (含各自权限集合)
pub async fn index(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<RoleWithPermissions>>>> {
    let roles = role::find_all(&state.pool).await?;
    Ok(ok(roles))
}

/// GET /api/roles/:id - 按 ID 查询角色
pub async fn show(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<RoleWithPermissions>>> {
    let found = role::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Role {id}")))?;
    Ok(ok(found))
}

/// POST /api/roles - 创建角色并授予权限
///
/// 重名返回 409；未知权限名在任何写入前整体拒绝。
pub async fn store(
    State(state): State<ServerState>,
    Json(payload): Json<RoleCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<RoleWithPermissions>>)> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("role name must not be empty"));
    }

    let created = role::create(&state.pool, payload).await?;

    security_log!(
        "INFO",
        "role_created",
        role_id = created.id,
        name = created.name.clone()
    );

    Ok((StatusCode::CREATED, ok(created)))
}

/// PUT /api/roles/:id - 更新角色
///
/// `permissions` 出现时整体替换授权集合 (一个事务内)。
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RoleUpdate>,
) -> AppResult<Json<AppResponse<RoleWithPermissions>>> {
    if let Some(name) = &payload.name
        && name.trim().is_empty()
    {
        return Err(AppError::validation("role name must not be empty"));
    }

    let updated = role::update(&state.pool, id, payload).await?;
    Ok(ok(updated))
}

/// DELETE /api/roles/:id - 删除角色
///
/// 级联收回该角色在所有用户上的分配。
pub async fn destroy(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    role::delete(&state.pool, id).await?;
    security_log!("WARN", "role_deleted", role_id = id);
    Ok(ok_with_message((), "Role deleted successfully"))
}
