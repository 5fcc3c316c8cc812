//! HTTP API integration tests
//!
//! Each test builds the real router over an in-memory SQLite database,
//! seeded exactly like production startup, and drives it with
//! `tower::ServiceExt::oneshot`.

use admin_server::api;
use admin_server::auth::{JwtConfig, JwtService};
use admin_server::core::{Config, ServerState};
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN_PASSWORD: &str = "integration-admin-pw";

async fn test_app() -> Router {
    let config = Config {
        http_port: 0,
        database_url: "sqlite::memory:".to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        log_dir: None,
        jwt: JwtConfig {
            secret: "integration-test-secret-key-32-chars!!".to_string(),
            expiration_minutes: 60,
            issuer: "admin-server".to_string(),
            audience: "pos-clients".to_string(),
        },
        environment: "test".to_string(),
    };
    let state = ServerState::initialize(&config)
        .await
        .expect("failed to initialize test state");
    api::router(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("failed to build request"),
        None => builder.body(Body::empty()).expect("failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response was not JSON")
    };
    (status, value)
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/login",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"]
        .as_str()
        .expect("login response missing token")
        .to_string()
}

async fn admin_token(app: &Router) -> String {
    login(app, "admin", ADMIN_PASSWORD).await
}

async fn create_product(app: &Router, token: &str, name: &str, price: f64) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/products",
        Some(token),
        Some(json!({"name": name, "price": price})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create product failed: {body}");
    body["data"]["id"].as_i64().expect("product id missing")
}

// ── Auth ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "up");
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = test_app().await;
    let (status, _) = send(&app, "GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/products", Some("garbage-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_validates_and_rejects_duplicates() {
    let app = test_app().await;

    // username shorter than 4 characters -> 422
    let (status, body) = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "name": "Jhonatan Guerrero",
            "username": "abc",
            "password": "password12345",
            "password_confirmation": "password12345"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");

    // mismatched confirmation -> 422
    let (status, _) = send(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "name": "Jhonatan Guerrero",
            "username": "jguerrero",
            "password": "password12345",
            "password_confirmation": "different12345"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let payload = json!({
        "name": "Jhonatan Guerrero",
        "username": "jguerrero",
        "password": "password12345",
        "password_confirmation": "password12345"
    });
    let (status, body) = send(&app, "POST", "/api/register", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["username"], "jguerrero");
    // password hash must never leak
    assert!(body["data"].get("password_hash").is_none());

    // same username again -> 409, the store is the authority,
    // with a stable message rather than the raw driver error
    let (status, body) = send(&app, "POST", "/api/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "username already exists");
}

#[tokio::test]
async fn login_hides_which_credential_was_wrong() {
    let app = test_app().await;

    let (status, a) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"username": "no-such-user", "password": "whatever-long"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, b) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"username": "admin", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // identical body for unknown user and bad password
    assert_eq!(a, b);
}

#[tokio::test]
async fn expired_token_is_rejected_with_expiry_code() {
    let app = test_app().await;

    // mint a token that was already stale at issue time
    let stale_issuer = JwtService::with_config(JwtConfig {
        secret: "integration-test-secret-key-32-chars!!".to_string(),
        expiration_minutes: -5,
        issuer: "admin-server".to_string(),
        audience: "pos-clients".to_string(),
    });
    let token = stale_issuer
        .generate_token(1, "Administrator Account", Some("admin"), &[])
        .expect("token generation failed");

    let (status, body) = send(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    // expiry is reported distinctly from missing/invalid tokens
    assert_eq!(body["code"], "E3003");

    let (_, body) = send(&app, "GET", "/api/me", Some("garbage-token"), None).await;
    assert_eq!(body["code"], "E3002");
    let (_, body) = send(&app, "GET", "/api/me", None, None).await;
    assert_eq!(body["code"], "E3001");
}

#[tokio::test]
async fn me_returns_fresh_role_and_permissions() {
    let app = test_app().await;
    let token = admin_token(&app).await;

    let (status, body) = send(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "admin");
    let permissions = body["data"]["permissions"].as_array().unwrap();
    assert_eq!(permissions.len(), 26);
}

#[tokio::test]
async fn logout_invalidates_token_within_ttl() {
    let app = test_app().await;
    let token = admin_token(&app).await;

    let (status, _) = send(&app, "POST", "/api/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    // the token is nowhere near expiry, but it must be dead
    let (status, _) = send(&app, "GET", "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_revokes_old_token_and_issues_working_one() {
    let app = test_app().await;
    let old_token = admin_token(&app).await;

    let (status, body) = send(&app, "POST", "/api/refresh", Some(&old_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let new_token = body["data"]["token"].as_str().unwrap().to_string();
    assert_ne!(old_token, new_token);

    let (status, _) = send(&app, "GET", "/api/me", Some(&old_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/me", Some(&new_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

// ── Authorization ────────────────────────────────────────────────────

#[tokio::test]
async fn permission_gate_is_or_semantics_over_effective_permissions() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    // coordinator can manage products but has no user permissions
    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({
            "name": "Coordinator Person",
            "username": "coord1",
            "password": "password12345",
            "password_confirmation": "password12345",
            "role": "coordinator"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let coord = login(&app, "coord1", "password12345").await;

    let (status, _) = send(&app, "GET", "/api/products", Some(&coord), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/api/users", Some(&coord), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn direct_permission_grant_takes_effect_on_next_token() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({
            "name": "Auxiliar Person One",
            "username": "aux1",
            "password": "password12345",
            "password_confirmation": "password12345",
            "role": "auxiliar"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let user_id = body["data"]["id"].as_i64().unwrap();

    let before = login(&app, "aux1", "password12345").await;
    let (status, _) = send(&app, "GET", "/api/users", Some(&before), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // unknown name anywhere in the batch -> nothing applied
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/users/{user_id}/permissions"),
        Some(&admin),
        Some(json!({"permissions": ["view_users", "not_a_permission"], "assign": true})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let recheck = login(&app, "aux1", "password12345").await;
    let (status, _) = send(&app, "GET", "/api/users", Some(&recheck), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/users/{user_id}/permissions"),
        Some(&admin),
        Some(json!({"permissions": ["view_users"], "assign": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let after = login(&app, "aux1", "password12345").await;
    let (status, _) = send(&app, "GET", "/api/users", Some(&after), None).await;
    assert_eq!(status, StatusCode::OK);

    // revoking puts things back
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/users/{user_id}/permissions"),
        Some(&admin),
        Some(json!({"permissions": ["view_users"], "assign": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let revoked = login(&app, "aux1", "password12345").await;
    let (status, _) = send(&app, "GET", "/api/users", Some(&revoked), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn permission_names_with_commas_do_not_widen_access() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    // a permission whose name embeds another permission's name
    let (status, _) = send(
        &app,
        "POST",
        "/api/permissions",
        Some(&admin),
        Some(json!({"name": "weird,view_users"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // role-less user holding only that grant
    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({
            "name": "Oddly Named Grantee",
            "username": "oddperms",
            "password": "password12345",
            "password_confirmation": "password12345"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/users/{id}/permissions"),
        Some(&admin),
        Some(json!({"permissions": ["weird,view_users"], "assign": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // the grant travels as one name; it must not decay into view_users
    let token = login(&app, "oddperms", "password12345").await;
    let (status, _) = send(&app, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ── Roles ────────────────────────────────────────────────────────────

#[tokio::test]
async fn role_update_replaces_permission_set() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/roles",
        Some(&admin),
        Some(json!({"name": "inventory", "permissions": ["view_products", "edit_products"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let role_id = body["data"]["id"].as_i64().unwrap();

    // duplicate name -> 409
    let (status, _) = send(
        &app,
        "POST",
        "/api/roles",
        Some(&admin),
        Some(json!({"name": "inventory"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // unknown permission -> rejected before any write
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/roles/{role_id}"),
        Some(&admin),
        Some(json!({"permissions": ["view_products", "made_up_permission"]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (_, body) = send(&app, "GET", &format!("/api/roles/{role_id}"), Some(&admin), None).await;
    assert_eq!(
        body["data"]["permissions"],
        json!(["edit_products", "view_products"])
    );

    // replacement, not merge
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/roles/{role_id}"),
        Some(&admin),
        Some(json!({"permissions": ["view_products"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", &format!("/api/roles/{role_id}"), Some(&admin), None).await;
    assert_eq!(body["data"]["permissions"], json!(["view_products"]));
}

#[tokio::test]
async fn deleting_role_revokes_it_from_users() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/roles",
        Some(&admin),
        Some(json!({"name": "temp_role", "permissions": ["view_products"]})),
    )
    .await;
    let role_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({
            "name": "Temporary Role Holder",
            "username": "temproleuser",
            "password": "password12345",
            "password_confirmation": "password12345",
            "role": "temp_role"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let before = login(&app, "temproleuser", "password12345").await;
    let (status, _) = send(&app, "GET", "/api/products", Some(&before), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/roles/{role_id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // assignment gone via cascade: fresh token carries nothing
    let after = login(&app, "temproleuser", "password12345").await;
    let (status, _) = send(&app, "GET", "/api/products", Some(&after), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ── Products lifecycle ───────────────────────────────────────────────

#[tokio::test]
async fn empty_product_list_explains_itself() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    let (status, body) = send(&app, "GET", "/api/products", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No enabled products found");
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn disable_restore_round_trip_preserves_fields() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    let id = create_product(&app, &admin, "Round Trip Tea", 4.2).await;
    let (_, before) = send(&app, "GET", &format!("/api/products/{id}"), Some(&admin), None).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/products/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/products/restore/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, after) = send(&app, "GET", &format!("/api/products/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["data"]["name"], before["data"]["name"]);
    assert_eq!(after["data"]["price"], before["data"]["price"]);
    assert_eq!(after["data"]["enabled"], true);
    assert_eq!(after["data"]["deleted_at"], Value::Null);
}

#[tokio::test]
async fn purge_is_only_reachable_from_disabled() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    let id = create_product(&app, &admin, "Stubborn Item", 9.99).await;

    // purging an active product is a 404, not a shortcut
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/products/force/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/api/products/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/products/force/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // gone from every view, and restore can no longer resurrect it
    for uri in [
        format!("/api/products/{id}"),
        format!("/api/products/trashed/{id}"),
    ] {
        let (status, _) = send(&app, "GET", &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/products/restore/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_validation_bounds() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    // name too short
    let (status, _) = send(
        &app,
        "POST",
        "/api/products",
        Some(&admin),
        Some(json!({"name": "ab", "price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // price out of range
    let (status, _) = send(
        &app,
        "POST",
        "/api/products",
        Some(&admin),
        Some(json!({"name": "Valid Name", "price": 10000.01})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // inclusive bounds are fine
    let (status, _) = send(
        &app,
        "POST",
        "/api/products",
        Some(&admin),
        Some(json!({"name": "Valid Name", "price": 0.01})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

/// The full lifecycle walk: create, disable, inspect both views,
/// restore, disable again, purge.
#[tokio::test]
async fn cafe_lifecycle_scenario() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    let id = create_product(&app, &admin, "Café Americano", 2.5).await;

    // visible in the active list and by id
    let (_, list) = send(&app, "GET", "/api/products", Some(&admin), None).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    // disable
    let (status, _) = send(&app, "DELETE", &format!("/api/products/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    // active views no longer see it; update refuses to touch it
    let (status, _) = send(&app, "GET", &format!("/api/products/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/products/{id}"),
        Some(&admin),
        Some(json!({"price": 3.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the disabled view does
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/products/trashed/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Café Americano");
    assert_eq!(body["data"]["enabled"], false);

    // restore brings it back intact
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/products/restore/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 2.5);
    assert_eq!(body["data"]["enabled"], true);

    // disable again, then purge for good
    let (status, _) = send(&app, "DELETE", &format!("/api/products/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/products/force/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, "GET", "/api/products/disabled", Some(&admin), None).await;
    assert_eq!(list["data"], json!([]));
}

// ── Users lifecycle ──────────────────────────────────────────────────

#[tokio::test]
async fn user_lifecycle_and_scoped_lookups() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({
            "name": "Disposable Employee",
            "username": "disposable",
            "password": "password12345",
            "password_confirmation": "password12345"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["data"]["id"].as_i64().unwrap();

    // substring search finds the active user
    let (status, body) = send(&app, "GET", "/api/users/name/Disposable", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // no match is a 404, not an empty 200
    let (status, _) = send(&app, "GET", "/api/users/name/Nobody", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // soft delete, then the scoped views swap over
    let (status, _) = send(&app, "DELETE", &format!("/api/users/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/api/users/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/users/trashed/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // a disabled user cannot log in
    let (status, _) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"username": "disposable", "password": "password12345"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // restore, then purge requires disabling first
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/users/restore/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/users/force/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/api/users/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/users/force/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/users/trashed/{id}"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_update_replaces_role_set() {
    let app = test_app().await;
    let admin = admin_token(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({
            "name": "Role Swap Subject",
            "username": "roleswap",
            "password": "password12345",
            "password_confirmation": "password12345",
            "role": "visitor"
        })),
    )
    .await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["roles"], json!(["visitor"]));

    // unknown role -> 422, nothing changes
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/users/{id}"),
        Some(&admin),
        Some(json!({"role": "no_such_role"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/users/{id}"),
        Some(&admin),
        Some(json!({"role": "coordinator"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["roles"], json!(["coordinator"]));
}
