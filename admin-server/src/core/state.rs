//! 服务器共享状态

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::auth::{JwtService, TokenBlacklist};
use crate::core::Config;
use crate::db;

/// 黑名单清理间隔
const BLACKLIST_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// 全部处理器共享的应用状态
///
/// 按 axum 约定整体 `Clone`，内部组件用 `Arc` 共享。
#[derive(Clone)]
pub struct ServerState {
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub blacklist: Arc<TokenBlacklist>,
    pub config: Arc<Config>,
}

impl ServerState {
    /// 连接数据库、应用迁移、写入种子数据并组装状态
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let pool = db::connect(&config.database_url).await?;
        db::seed::run(&pool, &config.admin_password).await?;

        Ok(Self {
            pool,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            blacklist: Arc::new(TokenBlacklist::new()),
            config: Arc::new(config.clone()),
        })
    }

    /// 启动后台任务：定期清理黑名单里已自然过期的条目
    pub fn start_background_tasks(&self) {
        let blacklist = self.blacklist.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(BLACKLIST_SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                let removed = blacklist.sweep();
                if removed > 0 {
                    tracing::debug!(removed, "Swept expired blacklist entries");
                }
            }
        });
    }
}
