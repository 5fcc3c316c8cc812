//! Role Repository
//!
//! 角色与权限授权的关系数据都走 `role_permissions` 关联表。
//! 更新里的权限集合是整体替换，不做合并。

use super::{RepoError, RepoResult, permission};
use shared::models::{Role, RoleCreate, RoleUpdate, RoleWithPermissions};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<RoleWithPermissions>> {
    let roles = sqlx::query_as::<_, Role>("SELECT id, name FROM roles ORDER BY name")
        .fetch_all(pool)
        .await?;

    let mut out = Vec::with_capacity(roles.len());
    for role in roles {
        let permissions = permission_names(pool, role.id).await?;
        out.push(RoleWithPermissions {
            id: role.id,
            name: role.name,
            permissions,
        });
    }
    Ok(out)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<RoleWithPermissions>> {
    let role = sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match role {
        Some(role) => {
            let permissions = permission_names(pool, role.id).await?;
            Ok(Some(RoleWithPermissions {
                id: role.id,
                name: role.name,
                permissions,
            }))
        }
        None => Ok(None),
    }
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Role>> {
    let role = sqlx::query_as::<_, Role>("SELECT id, name FROM roles WHERE name = ? LIMIT 1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(role)
}

/// 角色的权限名列表 (按名称排序)
pub async fn permission_names(pool: &SqlitePool, role_id: i64) -> RepoResult<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT p.name FROM permissions p \
         JOIN role_permissions rp ON rp.permission_id = p.id \
         WHERE rp.role_id = ? ORDER BY p.name",
    )
    .bind(role_id)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

/// 创建角色并授予权限
///
/// 未知权限名在任何写入前拒绝，整个操作在一个事务里。
pub async fn create(pool: &SqlitePool, data: RoleCreate) -> RepoResult<RoleWithPermissions> {
    let mut tx = pool.begin().await?;

    let permission_ids = permission::ensure_all_exist(&mut *tx, &data.permissions).await?;

    let id: i64 = sqlx::query_scalar("INSERT INTO roles (name) VALUES (?) RETURNING id")
        .bind(&data.name)
        .fetch_one(&mut *tx)
        .await?;

    for pid in permission_ids {
        sqlx::query("INSERT INTO role_permissions (role_id, permission_id) VALUES (?, ?)")
            .bind(id)
            .bind(pid)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create role".into()))
}

/// 更新角色；`permissions` 存在时整体替换授权集合
pub async fn update(pool: &SqlitePool, id: i64, data: RoleUpdate) -> RepoResult<RoleWithPermissions> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query("UPDATE roles SET name = COALESCE(?1, name) WHERE id = ?2")
        .bind(&data.name)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Role {id} not found")));
    }

    if let Some(names) = &data.permissions {
        let permission_ids = permission::ensure_all_exist(&mut *tx, names).await?;

        sqlx::query("DELETE FROM role_permissions WHERE role_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for pid in permission_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO role_permissions (role_id, permission_id) VALUES (?, ?)",
            )
            .bind(id)
            .bind(pid)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Role {id} not found")))
}

/// 删除角色；关联表 ON DELETE CASCADE 负责收回所有授权与分配
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM roles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Role {id} not found")));
    }
    Ok(())
}
