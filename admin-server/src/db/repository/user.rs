//! User Repository
//!
//! 用户查询按生命周期分三个视角：活跃 (`deleted_at IS NULL`)、已禁用
//! (`deleted_at IS NOT NULL`)、以及登录等内部场景的精确查询。
//! 角色分配和直接权限授权各走自己的关联表。

use super::{RepoError, RepoResult, permission};
use chrono::Utc;
use shared::models::{User, UserWithRoles};
use sqlx::SqlitePool;

const USER_COLUMNS: &str =
    "id, name, username, password_hash, created_at, updated_at, deleted_at";

fn with_roles(user: User, roles: Vec<String>) -> UserWithRoles {
    UserWithRoles { user, roles }
}

/// 用户的角色名列表
pub async fn role_names(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT r.name FROM roles r \
         JOIN user_roles ur ON ur.role_id = r.id \
         WHERE ur.user_id = ? ORDER BY ur.role_id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

/// 用户的直接权限名列表 (不含角色派生)
pub async fn direct_permission_names(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT p.name FROM permissions p \
         JOIN user_permissions up ON up.permission_id = p.id \
         WHERE up.user_id = ? ORDER BY p.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

/// 有效权限集合：直接授权 ∪ 角色派生，去重排序
///
/// 登录签发令牌和 `/api/me` 都用这个集合。
pub async fn effective_permission_names(
    pool: &SqlitePool,
    user_id: i64,
) -> RepoResult<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT p.name FROM permissions p \
         JOIN user_permissions up ON up.permission_id = p.id \
         WHERE up.user_id = ?1 \
         UNION \
         SELECT p.name FROM permissions p \
         JOIN role_permissions rp ON rp.permission_id = p.id \
         JOIN user_roles ur ON ur.role_id = rp.role_id \
         WHERE ur.user_id = ?1 \
         ORDER BY 1",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

async fn attach_roles(pool: &SqlitePool, users: Vec<User>) -> RepoResult<Vec<UserWithRoles>> {
    let mut out = Vec::with_capacity(users.len());
    for user in users {
        let roles = role_names(pool, user.id).await?;
        out.push(with_roles(user, roles));
    }
    Ok(out)
}

pub async fn find_all_active(pool: &SqlitePool) -> RepoResult<Vec<UserWithRoles>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    attach_roles(pool, users).await
}

pub async fn find_all_disabled(pool: &SqlitePool) -> RepoResult<Vec<UserWithRoles>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NOT NULL ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    attach_roles(pool, users).await
}

pub async fn find_active_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<UserWithRoles>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ? AND deleted_at IS NULL"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match user {
        Some(user) => {
            let roles = role_names(pool, user.id).await?;
            Ok(Some(with_roles(user, roles)))
        }
        None => Ok(None),
    }
}

pub async fn find_trashed_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<UserWithRoles>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ? AND deleted_at IS NOT NULL"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match user {
        Some(user) => {
            let roles = role_names(pool, user.id).await?;
            Ok(Some(with_roles(user, roles)))
        }
        None => Ok(None),
    }
}

/// 按显示名模糊查找活跃用户
pub async fn search_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Vec<UserWithRoles>> {
    let pattern = format!("%{name}%");
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE name LIKE ? AND deleted_at IS NULL ORDER BY id"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;
    attach_roles(pool, users).await
}

/// 登录用：按用户名查活跃用户 (含密码散列)
pub async fn find_active_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ? AND deleted_at IS NULL"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// 创建用户，可选地分配一个已存在的角色
///
/// 未知角色名在写入前拒绝；唯一约束冲突映射为 Duplicate。
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    username: &str,
    password_hash: &str,
    role: Option<&str>,
) -> RepoResult<UserWithRoles> {
    let mut tx = pool.begin().await?;

    let role_id = match role {
        Some(role_name) => {
            let id: Option<i64> = sqlx::query_scalar("SELECT id FROM roles WHERE name = ?")
                .bind(role_name)
                .fetch_optional(&mut *tx)
                .await?;
            match id {
                Some(id) => Some(id),
                None => {
                    return Err(RepoError::Validation(format!("unknown role: {role_name}")));
                }
            }
        }
        None => None,
    };

    let now = Utc::now();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (name, username, password_hash, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(username)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(role_id) = role_id {
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES (?, ?)")
            .bind(id)
            .bind(role_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// 部分更新活跃用户；`role` 存在时替换整个角色集合
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: Option<&str>,
    username: Option<&str>,
    password_hash: Option<&str>,
    role: Option<&str>,
) -> RepoResult<UserWithRoles> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE users SET \
         name = COALESCE(?1, name), \
         username = COALESCE(?2, username), \
         password_hash = COALESCE(?3, password_hash), \
         updated_at = ?4 \
         WHERE id = ?5 AND deleted_at IS NULL",
    )
    .bind(name)
    .bind(username)
    .bind(password_hash)
    .bind(Utc::now())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }

    if let Some(role_name) = role {
        let role_id: Option<i64> = sqlx::query_scalar("SELECT id FROM roles WHERE name = ?")
            .bind(role_name)
            .fetch_optional(&mut *tx)
            .await?;
        let role_id =
            role_id.ok_or_else(|| RepoError::Validation(format!("unknown role: {role_name}")))?;

        sqlx::query("DELETE FROM user_roles WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES (?, ?)")
            .bind(id)
            .bind(role_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

/// 软删除：仅活跃用户可删，单条带守卫的 UPDATE
pub async fn soft_delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE users SET deleted_at = ?1, updated_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
    )
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

/// 恢复：仅已禁用用户可恢复
pub async fn restore(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE users SET deleted_at = NULL, updated_at = ?1 \
         WHERE id = ?2 AND deleted_at IS NOT NULL",
    )
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Disabled user {id} not found")));
    }
    Ok(())
}

/// 彻底删除：只能从禁用态出发，活跃用户直接 404
pub async fn force_delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM users WHERE id = ? AND deleted_at IS NOT NULL")
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Disabled user {id} not found")));
    }
    Ok(())
}

/// 授予或收回一批直接权限，all-or-nothing
///
/// 所有名称先对权限表校验，任何一个未知都整体拒绝。
pub async fn sync_permissions(
    pool: &SqlitePool,
    id: i64,
    names: &[String],
    assign: bool,
) -> RepoResult<UserWithRoles> {
    let mut tx = pool.begin().await?;

    let exists: Option<i64> =
        sqlx::query_scalar("SELECT id FROM users WHERE id = ? AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    if exists.is_none() {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }

    let permission_ids = permission::ensure_all_exist(&mut *tx, names).await?;

    for pid in permission_ids {
        if assign {
            sqlx::query(
                "INSERT OR IGNORE INTO user_permissions (user_id, permission_id) VALUES (?, ?)",
            )
            .bind(id)
            .bind(pid)
            .execute(&mut *tx)
            .await?;
        } else {
            sqlx::query("DELETE FROM user_permissions WHERE user_id = ? AND permission_id = ?")
                .bind(id)
                .bind(pid)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;

    find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}
