//! 数据库层：连接池、迁移与启动种子数据

pub mod repository;
pub mod seed;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// 建立连接池并应用迁移
///
/// 内存库 (`sqlite::memory:`) 限制为单连接，否则每个连接各自拿到
/// 一个空库。外键约束显式打开，级联删除依赖它。
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let max_connections = if database_url.contains(":memory:") {
        1
    } else {
        5
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
