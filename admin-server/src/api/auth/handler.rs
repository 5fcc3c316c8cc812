//! Auth API Handlers

use std::sync::OnceLock;

use axum::{Json, extract::State, http::StatusCode};

use shared::client::{
    CurrentUserResponse, LoginRequest, LoginResponse, RegisterRequest, TokenResponse, UserInfo,
};
use shared::models::UserWithRoles;

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::validation::{
    MAX_DISPLAY_NAME_LEN, MAX_USERNAME_LEN, MIN_DISPLAY_NAME_LEN, MIN_USERNAME_LEN, validate_password,
    validate_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// POST /api/register - 注册新用户 (公共接口)
///
/// 新用户没有任何角色和权限，需要管理员后续分配。
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterRequest>,
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
        None,
    )
    .await?;

    security_log!(
        "INFO",
        "user_registered",
        user_id = created.user.id,
        username = created.user.username.clone()
    );

    Ok((StatusCode::CREATED, ok(created)))
}

/// 用户不存在时校验用的固定哈希，抹平与密码错误路径的时间差
static MISS_HASH: OnceLock<String> = OnceLock::new();

fn miss_hash() -> &'static str {
    MISS_HASH.get_or_init(|| hash_password("login-miss-padding").unwrap_or_default())
}

/// POST /api/login - 登录 (公共接口)
///
/// 用户不存在与密码错误返回同一个 401，防止用户名枚举。
/// 未命中用户时也执行一次完整的哈希校验，两条失败路径耗时一致。
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let found = user::find_active_by_username(&state.pool, &payload.username).await?;

    let Some(record) = found else {
        let _ = verify_password(&payload.password, miss_hash());
        security_log!("WARN", "login_failed", username = payload.username.clone());
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(&payload.password, &record.password_hash) {
        security_log!("WARN", "login_failed", username = payload.username.clone());
        return Err(AppError::invalid_credentials());
    }

    let roles = user::role_names(&state.pool, record.id).await?;
    let role = roles.first().cloned();
    let permissions = user::effective_permission_names(&state.pool, record.id).await?;

    let token = state
        .jwt_service
        .generate_token(record.id, &record.name, role.as_deref(), &permissions)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    security_log!(
        "INFO",
        "login_success",
        user_id = record.id,
        username = record.username.clone()
    );

    Ok(ok(LoginResponse {
        token,
        user: UserInfo {
            id: record.id,
            name: record.name,
            username: record.username,
            role,
        },
    }))
}

/// GET /api/me - 当前用户信息
///
/// 角色和权限从数据库实时读取，不依赖令牌里可能过期的快照。
pub async fn me(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<CurrentUserResponse>>> {
    let found = user::find_active_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", current.id)))?;

    let permissions = user::effective_permission_names(&state.pool, current.id).await?;
    let role = found.roles.first().cloned();

    Ok(ok(CurrentUserResponse {
        user: UserInfo {
            id: found.user.id,
            name: found.user.name,
            username: found.user.username,
            role: role.clone(),
        },
        role,
        permissions,
    }))
}

/// POST /api/logout - 注销当前令牌
///
/// 把令牌的 `jti` 放进黑名单，在自然过期前持续被拒。
pub async fn logout(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<()>>> {
    state.blacklist.revoke(&current.jti, current.exp);

    security_log!("INFO", "logout", user_id = current.id, jti = current.jti.clone());

    Ok(ok_with_message((), "Logged out successfully"))
}

/// POST /api/refresh - 刷新令牌
///
/// 吊销旧令牌后按数据库当前状态重新签发：期间的角色/权限变更
/// 会体现在新令牌里。旧令牌立即失效。
pub async fn refresh(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<AppResponse<TokenResponse>>> {
    let found = user::find_active_by_id(&state.pool, current.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {}", current.id)))?;

    state.blacklist.revoke(&current.jti, current.exp);

    let role = found.roles.first().cloned();
    let permissions = user::effective_permission_names(&state.pool, current.id).await?;

    let token = state
        .jwt_service
        .generate_token(found.user.id, &found.user.name, role.as_deref(), &permissions)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    security_log!(
        "INFO",
        "token_refreshed",
        user_id = current.id,
        revoked_jti = current.jti.clone()
    );

    Ok(ok(TokenResponse { token }))
}
