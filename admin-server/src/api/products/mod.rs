//! Product API 模块
//!
//! 生命周期路由：`/disabled`、`/trashed/{id}`、`/restore/{id}`、
//! `/force/{id}` 是静态段，优先于 `/{id}` 匹配。

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::api::guarded;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .merge(guarded(
            &["view_products"],
            Router::new()
                .route("/", get(handler::index))
                .route("/{id}", get(handler::show)),
        ))
        .merge(guarded(
            &["view_disabled_products"],
            Router::new().route("/disabled", get(handler::index_disabled)),
        ))
        .merge(guarded(
            &["view_trashed_product"],
            Router::new().route("/trashed/{id}", get(handler::show_trashed)),
        ))
        .merge(guarded(
            &["create_products"],
            Router::new().route("/", post(handler::store)),
        ))
        .merge(guarded(
            &["edit_products"],
            Router::new().route("/{id}", patch(handler::update)),
        ))
        .merge(guarded(
            &["restore_products"],
            Router::new().route("/restore/{id}", patch(handler::restore)),
        ))
        .merge(guarded(
            &["delete_products"],
            Router::new().route("/{id}", delete(handler::destroy)),
        ))
        .merge(guarded(
            &["force_delete_products"],
            Router::new().route("/force/{id}", delete(handler::force_delete)),
        ))
}
