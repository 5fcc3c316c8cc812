//! Health API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /api/health - 健康检查 (公共接口)
pub async fn health(State(state): State<ServerState>) -> AppResult<Json<AppResponse<HealthStatus>>> {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => "up",
        Err(e) => {
            tracing::warn!(error = %e, "Health check database probe failed");
            "down"
        }
    };

    Ok(ok(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database,
    }))
}
