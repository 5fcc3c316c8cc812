//! 权限注册表
//!
//! 权限是封闭集合：所有名称在这里列出，启动时幂等写入权限表，
//! 之后任何授予/分配都以权限表为准校验。

/// 全部权限名称
pub const ALL_PERMISSIONS: &[&str] = &[
    // Role permissions
    "view_roles",
    "create_roles",
    "edit_roles",
    "delete_roles",
    // Permission permissions
    "view_permissions",
    "create_permissions",
    "edit_permissions",
    "delete_permissions",
    // User permissions
    "view_users",
    "create_users",
    "edit_users",
    "delete_users",
    "restore_users",
    "force_delete_users",
    "view_disabled_users",
    "view_trashed_users",
    "view_users_by_name",
    "edit_users_permissions",
    // Product permissions
    "view_products",
    "create_products",
    "edit_products",
    "delete_products",
    "restore_products",
    "force_delete_products",
    "view_disabled_products",
    "view_trashed_product",
];

/// 内置角色及其默认权限集合 (种子数据用)
///
/// `admin` 拿到全部权限。
pub const DEFAULT_ROLES: &[(&str, &[&str])] = &[
    ("admin", ALL_PERMISSIONS),
    (
        "coordinator",
        &[
            "view_products",
            "create_products",
            "edit_products",
            "delete_products",
            "view_disabled_products",
            "view_trashed_product",
        ],
    ),
    ("auxiliar", &["view_products", "create_products"]),
    (
        "visitor",
        &[
            "view_products",
            "view_disabled_products",
            "view_trashed_product",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_complete() {
        assert_eq!(ALL_PERMISSIONS.len(), 26);
        // 默认角色只引用注册表里的名称
        for (_, perms) in DEFAULT_ROLES {
            for p in *perms {
                assert!(ALL_PERMISSIONS.contains(p), "unregistered permission: {p}");
            }
        }
    }
}
