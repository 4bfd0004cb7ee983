//! HTTP-level integration tests for login, RBAC enforcement, admin user
//! management and the admin bootstrap.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, delete_auth, get, get_auth, post_json, post_json_auth, TEST_PASSWORD,
};
use intake_api::auth::jwt::validate_token;
use intake_api::bootstrap::{ensure_admin, AdminBootstrap};
use intake_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_user(&pool, "dana", "staff").await;
    let test = common::build_test_app(pool);

    let body = json!({ "username": "dana", "password": TEST_PASSWORD });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "staff");
    assert!(json["user"].get("password_hash").is_none());

    let claims = validate_token(json["access_token"].as_str().unwrap(), &test.config.jwt)
        .expect("issued token should validate");
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.username, "dana");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    create_user(&pool, "dana", "staff").await;
    let test = common::build_test_app(pool);

    let body = json!({ "username": "dana", "password": "not-the-password" });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let test = common::build_test_app(pool);

    let body = json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let user = create_user(&pool, "gone", "staff").await;
    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let test = common::build_test_app(pool);

    let body = json!({ "username": "gone", "password": TEST_PASSWORD });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// RBAC
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_routes_require_token(pool: PgPool) {
    let test = common::build_test_app(pool);

    let response = get(test.app(), "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(test.app(), "/api/v1/projects", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_cannot_use_admin_routes(pool: PgPool) {
    let staff = create_user(&pool, "dana", "staff").await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&staff);

    let response = get_auth(test.app(), "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(test.app(), "/api/v1/logs", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        test.app(),
        "/api/v1/categories",
        json!({ "name": "Design" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Staff routes are fine.
    let response = get_auth(test.app(), "/api/v1/projects", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Admin user management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_creates_staff_user(pool: PgPool) {
    let admin = create_user(&pool, "root", "admin").await;
    let test = common::build_test_app(pool.clone());
    let token = test.token_for(&admin);

    let body = json!({
        "username": "newhire",
        "email": "newhire@example.com",
        "password": "long-enough-password",
    });
    let response = post_json_auth(test.app(), "/api/v1/admin/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "newhire");
    assert_eq!(json["role"], "staff");

    // The new account can log in.
    let body = json!({ "username": "newhire", "password": "long-enough-password" });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_user_validation(pool: PgPool) {
    let admin = create_user(&pool, "root", "admin").await;
    let test = common::build_test_app(pool);
    let token = test.token_for(&admin);

    let short_password = json!({
        "username": "a", "email": "a@example.com", "password": "short",
    });
    let response = post_json_auth(test.app(), "/api/v1/admin/users", short_password, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_role = json!({
        "username": "a", "email": "a@example.com", "password": "long-enough-password",
        "role": "superuser",
    });
    let response = post_json_auth(test.app(), "/api/v1/admin/users", bad_role, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let duplicate = json!({
        "username": "root", "email": "r@example.com", "password": "long-enough-password",
    });
    let response = post_json_auth(test.app(), "/api/v1/admin/users", duplicate, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_deletes_user_but_not_self(pool: PgPool) {
    let admin = create_user(&pool, "root", "admin").await;
    let staff = create_user(&pool, "dana", "staff").await;
    let test = common::build_test_app(pool.clone());
    let token = test.token_for(&admin);

    let response = delete_auth(
        test.app(),
        &format!("/api/v1/admin/users/{}", admin.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete_auth(
        test.app(),
        &format!("/api/v1/admin/users/{}", staff.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(UserRepo::find_by_id(&pool, staff.id).await.unwrap().is_none());

    let response = delete_auth(
        test.app(),
        &format!("/api/v1/admin/users/{}", staff.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_admin_is_created_once(pool: PgPool) {
    let admin = AdminBootstrap {
        username: "owner".to_string(),
        password: "owner-password".to_string(),
        email: "owner@example.com".to_string(),
    };

    assert!(ensure_admin(&pool, &admin).await.unwrap());
    assert!(!ensure_admin(&pool, &admin).await.unwrap());

    let user = UserRepo::find_by_username(&pool, "owner")
        .await
        .unwrap()
        .expect("bootstrap admin should exist");
    assert_eq!(user.role, "admin");
}
