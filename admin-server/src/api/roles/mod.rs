//! Role API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::api::guarded;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/roles", role_routes())
}

fn role_routes() -> Router<ServerState> {
    Router::new()
        .merge(guarded(
            &["view_roles"],
            Router::new()
                .route("/", get(handler::index))
                .route("/{id}", get(handler::show)),
        ))
        .merge(guarded(
            &["create_roles"],
            Router::new().route("/", post(handler::store)),
        ))
        .merge(guarded(
            &["edit_roles"],
            Router::new().route("/{id}", put(handler::update)),
        ))
        .merge(guarded(
            &["delete_roles"],
            Router::new().route("/{id}", delete(handler::destroy)),
        ))
}
