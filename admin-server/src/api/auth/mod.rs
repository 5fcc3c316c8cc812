//! Auth API 模块
//!
//! 注册和登录是公共接口；注销、刷新和当前用户信息要求有效令牌
//! (认证中间件负责校验并注入 [`crate::auth::CurrentUser`])。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/register", post(handler::register))
        .route("/api/login", post(handler::login))
        .route("/api/me", get(handler::me))
        .route("/api/logout", post(handler::logout))
        .route("/api/refresh", post(handler::refresh))
}
