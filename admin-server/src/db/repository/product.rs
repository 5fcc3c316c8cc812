//! Product Repository
//!
//! 商品生命周期只有一个轴：`deleted_at IS NULL` 为活跃，非空为禁用，
//! 行删除即彻底清除。`enabled` 字段由查询派生，保持线上格式不变。
//! 禁用/恢复/清除都是单条带状态守卫的语句，0 行受影响即 NotFound。

use super::{RepoError, RepoResult};
use chrono::Utc;
use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::SqlitePool;

const PRODUCT_COLUMNS: &str = "id, name, price, (deleted_at IS NULL) AS enabled, \
                               created_at, updated_at, deleted_at";

pub async fn find_all_active(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE deleted_at IS NULL ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_all_disabled(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE deleted_at IS NOT NULL ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

/// 活跃视角查询：禁用商品在这里等同不存在
pub async fn find_active_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ? AND deleted_at IS NULL"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

/// 禁用视角查询：活跃商品在这里等同不存在
pub async fn find_trashed_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ? AND deleted_at IS NOT NULL"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let now = Utc::now();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO products (name, price, created_at, updated_at) \
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// 部分更新，仅活跃商品
pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE products SET \
         name = COALESCE(?1, name), \
         price = COALESCE(?2, price), \
         updated_at = ?3 \
         WHERE id = ?4 AND deleted_at IS NULL",
    )
    .bind(&data.name)
    .bind(data.price)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// 禁用：活跃 → 禁用，打上删除时间戳
pub async fn soft_delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE products SET deleted_at = ?1, updated_at = ?1 \
         WHERE id = ?2 AND deleted_at IS NULL",
    )
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    Ok(())
}

/// 恢复：禁用 → 活跃，其余字段原样保留
pub async fn restore(pool: &SqlitePool, id: i64) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE products SET deleted_at = NULL, updated_at = ?1 \
         WHERE id = ?2 AND deleted_at IS NOT NULL",
    )
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Disabled product {id} not found"
        )));
    }
    find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// 彻底清除：只能从禁用态出发，活跃商品在这里是 404
pub async fn force_delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM products WHERE id = ? AND deleted_at IS NOT NULL")
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Disabled product {id} not found"
        )));
    }
    Ok(())
}
