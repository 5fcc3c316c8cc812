//! Data models
//!
//! Row-level entities plus their create/update payloads. Soft-deletable
//! entities carry a single `deleted_at` column: `NULL` means active,
//! non-null means disabled, a missing row means purged.

mod permission;
mod product;
mod role;
mod user;

pub use permission::{Permission, PermissionCreate, PermissionUpdate};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use role::{Role, RoleCreate, RoleUpdate, RoleWithPermissions};
pub use user::{User, UserCreate, UserUpdate, UserWithRoles};
