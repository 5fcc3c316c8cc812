//! 认证与授权
//!
//! JWT 签发/验证、密码散列、令牌黑名单、认证/授权中间件，
//! 以及封闭的权限注册表。

pub mod blacklist;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use blacklist::TokenBlacklist;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_any, require_auth};
pub use password::{hash_password, verify_password};
