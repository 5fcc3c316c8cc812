//! 启动种子数据
//!
//! 幂等：权限表写满注册表，内置角色补齐默认授权，保证存在一个
//! 持有 admin 角色的管理员账号。重复启动不会产生重复行。

use crate::auth::permissions::{ALL_PERMISSIONS, DEFAULT_ROLES};
use crate::auth::password::hash_password;
use chrono::Utc;
use sqlx::SqlitePool;

/// 管理员账号的默认用户名
pub const ADMIN_USERNAME: &str = "admin";

/// 写入权限注册表、内置角色和管理员账号
pub async fn run(pool: &SqlitePool, admin_password: &str) -> anyhow::Result<()> {
    seed_permissions(pool).await?;
    seed_roles(pool).await?;
    seed_admin_user(pool, admin_password).await?;
    tracing::info!("Database seed complete");
    Ok(())
}

async fn seed_permissions(pool: &SqlitePool) -> anyhow::Result<()> {
    for name in ALL_PERMISSIONS {
        sqlx::query("INSERT OR IGNORE INTO permissions (name) VALUES (?)")
            .bind(name)
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn seed_roles(pool: &SqlitePool) -> anyhow::Result<()> {
    for (role_name, permission_names) in DEFAULT_ROLES {
        sqlx::query("INSERT OR IGNORE INTO roles (name) VALUES (?)")
            .bind(role_name)
            .execute(pool)
            .await?;

        let role_id: i64 = sqlx::query_scalar("SELECT id FROM roles WHERE name = ?")
            .bind(role_name)
            .fetch_one(pool)
            .await?;

        for permission_name in *permission_names {
            sqlx::query(
                "INSERT OR IGNORE INTO role_permissions (role_id, permission_id) \
                 SELECT ?, id FROM permissions WHERE name = ?",
            )
            .bind(role_id)
            .bind(permission_name)
            .execute(pool)
            .await?;
        }
    }
    Ok(())
}

async fn seed_admin_user(pool: &SqlitePool, admin_password: &str) -> anyhow::Result<()> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(ADMIN_USERNAME)
        .fetch_optional(pool)
        .await?;

    if existing.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(admin_password)
        .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e}"))?;

    let now = Utc::now();
    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO users (name, username, password_hash, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind("Administrator Account")
    .bind(ADMIN_USERNAME)
    .bind(&password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        "INSERT INTO user_roles (user_id, role_id) SELECT ?, id FROM roles WHERE name = 'admin'",
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    tracing::info!(username = ADMIN_USERNAME, "Seeded administrator account");
    Ok(())
}
