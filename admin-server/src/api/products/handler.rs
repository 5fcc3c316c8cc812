//! Product API Handlers
//!
//! 查询按生命周期分视角：活跃接口看不到禁用商品 (返回 404，不泄露
//! 存在性)，`trashed` 接口只看禁用商品。

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::security_log;
use crate::utils::validation::{
    MAX_PRODUCT_NAME_LEN, MIN_PRODUCT_NAME_LEN, validate_optional_price, validate_optional_text,
    validate_price, validate_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// GET /api/products - 活跃商品列表
///
/// 空列表返回 200 和说明性消息。
pub async fn index(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let products = product::find_all_active(&state.pool).await?;
    if products.is_empty() {
        return Ok(ok_with_message(products, "No enabled products found"));
    }
    Ok(ok(products))
}

/// GET /api/products/disabled - 已禁用商品列表
pub async fn index_disabled(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let products = product::find_all_disabled(&state.pool).await?;
    if products.is_empty() {
        return Ok(ok_with_message(products, "No disabled products found"));
    }
    Ok(ok(products))
}

/// GET /api/products/:id - 按 ID 查询活跃商品
pub async fn show(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Product>>> {
    let found = product::find_active_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    Ok(ok(found))
}

/// GET /api/products/trashed/:id - 按 ID 查询已禁用商品
pub async fn show_trashed(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Product>>> {
    let found = product::find_trashed_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Disabled product {id}")))?;
    Ok(ok(found))
}

/// POST /api/products - 创建商品 (初始为活跃状态)
pub async fn store(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<AppResponse<Product>>)> {
    validate_text(&payload.name, "name", MIN_PRODUCT_NAME_LEN, MAX_PRODUCT_NAME_LEN)?;
    validate_price(payload.price)?;

    let created = product::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, ok(created)))
}

/// PATCH /api/products/:id - 部分更新活跃商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<Product>>> {
    validate_optional_text(
        &payload.name,
        "name",
        MIN_PRODUCT_NAME_LEN,
        MAX_PRODUCT_NAME_LEN,
    )?;
    validate_optional_price(payload.price)?;

    let updated = product::update(&state.pool, id, payload).await?;
    Ok(ok(updated))
}

/// DELETE /api/products/:id - 禁用商品 (活跃 → 禁用)
pub async fn destroy(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    product::soft_delete(&state.pool, id).await?;
    Ok(ok_with_message((), "Product disabled successfully"))
}

/// PATCH /api/products/restore/:id - 恢复商品 (禁用 → 活跃)
pub async fn restore(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<Product>>> {
    let restored = product::restore(&state.pool, id).await?;
    Ok(ok_with_message(restored, "Product restored successfully"))
}

/// DELETE /api/products/force/:id - 彻底清除 (仅已禁用商品)
///
/// 活跃商品在这里是 404：清除只能从禁用态出发。
pub async fn force_delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    product::force_delete(&state.pool, id).await?;
    security_log!("WARN", "product_purged", product_id = id);
    Ok(ok_with_message((), "Product permanently deleted"))
}
