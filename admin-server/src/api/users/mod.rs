//! User API 模块
//!
//! 每条路由套自己的授权要求；静态段 (`/disabled`、`/trashed`、
//! `/restore`、`/force`、`/name`) 优先于 `/{id}` 匹配。

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::api::guarded;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", user_routes())
}

fn user_routes() -> Router<ServerState> {
    Router::new()
        .merge(guarded(
            &["view_users"],
            Router::new()
                .route("/", get(handler::index))
                .route("/{id}", get(handler::show)),
        ))
        .merge(guarded(
            &["view_disabled_users"],
            Router::new().route("/disabled", get(handler::index_disabled)),
        ))
        .merge(guarded(
            &["view_trashed_users"],
            Router::new().route("/trashed/{id}", get(handler::show_trashed)),
        ))
        .merge(guarded(
            &["view_users_by_name"],
            Router::new().route("/name/{name}", get(handler::show_by_name)),
        ))
        .merge(guarded(
            &["create_users"],
            Router::new().route("/", post(handler::store)),
        ))
        .merge(guarded(
            &["edit_users"],
            Router::new().route("/{id}", patch(handler::update)),
        ))
        .merge(guarded(
            &["edit_users_permissions"],
            Router::new().route("/{id}/permissions", patch(handler::sync_permissions)),
        ))
        .merge(guarded(
            &["restore_users"],
            Router::new().route("/restore/{id}", patch(handler::restore)),
        ))
        .merge(guarded(
            &["delete_users"],
            Router::new().route("/{id}", delete(handler::destroy)),
        ))
        .merge(guarded(
            &["force_delete_users"],
            Router::new().route("/force/{id}", delete(handler::force_delete)),
        ))
}
