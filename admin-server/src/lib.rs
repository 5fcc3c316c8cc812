//! POS Admin Server - 销售点后台管理服务
//!
//! # 架构概述
//!
//! 本模块是管理后台的主入口，提供以下核心功能：
//!
//! - **认证** (`auth`): JWT + Argon2 认证体系，令牌黑名单，权限注册表
//! - **数据库** (`db`): SQLite (sqlx) 存储、迁移与种子数据
//! - **HTTP API** (`api`): 用户/角色/权限/商品的 RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! admin-server/src/
//! ├── core/          # 配置、状态、服务器生命周期
//! ├── auth/          # JWT 认证、密码散列、授权中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (仓储、迁移、种子)
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService, TokenBlacklist};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
    ($level:expr, $event:expr) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
        );
    };
}

/// 设置运行环境：加载 .env 并初始化日志
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
