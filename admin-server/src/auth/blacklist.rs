//! 令牌黑名单
//!
//! 注销和刷新都是把旧令牌的 `jti` 放进这里，令牌在自然过期前
//! 持续被拒。后台任务定期清掉已过期的条目，防止无限增长。

use chrono::Utc;
use dashmap::DashMap;

/// 以 `jti` 为键、过期时间戳为值的内存黑名单
#[derive(Debug, Default)]
pub struct TokenBlacklist {
    entries: DashMap<String, i64>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// 吊销令牌，记录其自然过期时间
    pub fn revoke(&self, jti: &str, exp: i64) {
        self.entries.insert(jti.to_string(), exp);
    }

    /// 该令牌是否已被吊销
    pub fn is_revoked(&self, jti: &str) -> bool {
        self.entries.contains_key(jti)
    }

    /// 清掉已自然过期的条目，返回清理数量
    pub fn sweep(&self) -> usize {
        let now = Utc::now().timestamp();
        let before = self.entries.len();
        self.entries.retain(|_, exp| *exp > now);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoked_token_stays_revoked_until_expiry() {
        let blacklist = TokenBlacklist::new();
        let future = Utc::now().timestamp() + 3600;

        blacklist.revoke("token-a", future);
        assert!(blacklist.is_revoked("token-a"));
        assert!(!blacklist.is_revoked("token-b"));

        // 未到期的条目不会被清理
        assert_eq!(blacklist.sweep(), 0);
        assert!(blacklist.is_revoked("token-a"));
    }

    #[test]
    fn sweep_drops_expired_entries() {
        let blacklist = TokenBlacklist::new();
        blacklist.revoke("stale", Utc::now().timestamp() - 10);
        blacklist.revoke("fresh", Utc::now().timestamp() + 3600);

        assert_eq!(blacklist.sweep(), 1);
        assert!(!blacklist.is_revoked("stale"));
        assert!(blacklist.is_revoked("fresh"));
    }
}
