//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册/登录/注销/刷新/当前用户
//! - [`users`] - 用户管理接口 (含软删除生命周期和直接权限授权)
//! - [`roles`] - 角色管理接口
//! - [`permissions`] - 权限管理接口
//! - [`products`] - 商品管理接口 (含软删除生命周期)
//!
//! 全局认证中间件在这里套上；每组路由再按需套各自的授权要求。

pub mod auth;
pub mod health;
pub mod permissions;
pub mod products;
pub mod roles;
pub mod users;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{require_any, require_auth};
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// 组装完整的应用路由
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(roles::router())
        .merge(permissions::router())
        .merge(products::router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 给一组路由套上授权要求 (OR 语义)
pub(crate) fn guarded(
    required: &'static [&'static str],
    routes: Router<ServerState>,
) -> Router<ServerState> {
    routes.route_layer(axum::middleware::from_fn(require_any(required)))
}
