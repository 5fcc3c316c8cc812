//! Permission Repository

use super::{RepoError, RepoResult};
use shared::models::{Permission, PermissionCreate, PermissionUpdate};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Permission>> {
    let permissions =
        sqlx::query_as::<_, Permission>("SELECT id, name FROM permissions ORDER BY name")
            .fetch_all(pool)
            .await?;
    Ok(permissions)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Permission>> {
    let permission =
        sqlx::query_as::<_, Permission>("SELECT id, name FROM permissions WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(permission)
}

/// 校验一批权限名全部存在，返回未知名称的校验错误
///
/// 授予/分配前必须调用，保证 all-or-nothing 语义。
pub async fn ensure_all_exist(
    conn: &mut sqlx::SqliteConnection,
    names: &[String],
) -> RepoResult<Vec<i64>> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM permissions WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;
        match id {
            Some(id) => ids.push(id),
            None => {
                return Err(RepoError::Validation(format!(
                    "unknown permission: {name}"
                )));
            }
        }
    }
    Ok(ids)
}

pub async fn create(pool: &SqlitePool, data: PermissionCreate) -> RepoResult<Permission> {
    let id: i64 = sqlx::query_scalar("INSERT INTO permissions (name) VALUES (?) RETURNING id")
        .bind(&data.name)
        .fetch_one(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create permission".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: PermissionUpdate) -> RepoResult<Permission> {
    let rows = sqlx::query("UPDATE permissions SET name = COALESCE(?1, name) WHERE id = ?2")
        .bind(&data.name)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Permission {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Permission {id} not found")))
}

/// 删除权限，级联清掉角色/用户上的授权
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM permissions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Permission {id} not found")));
    }
    Ok(())
}
