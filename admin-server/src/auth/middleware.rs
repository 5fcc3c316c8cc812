//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT，再查黑名单：
/// 注销/刷新过的令牌即使签名有效也被拒。验证成功后将 [`CurrentUser`]
/// 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `/api/register`、`/api/login`、`/api/health` (公共接口)
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效/已吊销令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 公共 API 路由跳过认证
    let is_public_api_route =
        path == "/api/register" || path == "/api/login" || path == "/api/health";
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            return match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            };
        }
    };

    // 已吊销的令牌在自然过期前持续被拒
    if state.blacklist.is_revoked(&claims.jti) {
        security_log!(
            "WARN",
            "auth_revoked",
            jti = claims.jti.clone(),
            uri = format!("{:?}", req.uri())
        );
        return Err(AppError::invalid_token("Token has been revoked"));
    }

    let user = CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed claims: {e}")))?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// 授权中间件 - 要求满足要求集合中的任意一项
///
/// # 规则
///
/// 放行当且仅当调用者的角色名在集合里，或其任一有效权限名在集合里
/// (OR 语义)。要求集合通常是单个权限名，必要时附上角色名。
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/products", get(handler::index))
///     .layer(middleware::from_fn(require_any(&["view_products"])));
/// ```
///
/// # 错误
///
/// 不满足任何一项返回 403 Forbidden
pub fn require_any(
    required: &'static [&'static str],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_any(required) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id,
                    name = user.name.clone(),
                    required = required.join("|")
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    required.join("|")
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
