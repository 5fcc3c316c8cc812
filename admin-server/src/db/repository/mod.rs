//! 数据库仓储层
//!
//! 每个实体一个模块，仓储函数直接操作 `SqlitePool`。

pub mod permission;
pub mod product;
pub mod role;
pub mod user;

use thiserror::Error;

/// 仓储层错误
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("duplicate entry: {0}")]
    Duplicate(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                // SQLite 报 "UNIQUE constraint failed: users.username"，
                // 对外只暴露列名，不透出驱动原文
                let field = db
                    .message()
                    .rsplit('.')
                    .next()
                    .unwrap_or("value")
                    .trim()
                    .to_string();
                RepoError::Duplicate(format!("{field} already exists"))
            }
            _ => RepoError::Database(e.to_string()),
        }
    }
}
