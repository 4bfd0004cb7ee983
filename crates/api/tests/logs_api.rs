//! HTTP-level integration tests for the application log: handlers publish
//! events, the persistence task writes them, admins read them back.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, post_json, submission, test_today};
use intake_db::repositories::ApplicationLogRepo;
use intake_events::LogPersistence;
use sqlx::PgPool;

/// Poll until `expected` log rows exist, or give up after two seconds.
async fn wait_for_logs(pool: &PgPool, expected: i64) {
    for _ in 0..40 {
        if ApplicationLogRepo::count(pool, None).await.unwrap() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("expected {expected} application log rows");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submission_is_logged_and_listed(pool: PgPool) {
    let admin = create_user(&pool, "root", "admin").await;
    let test = common::build_test_app(pool.clone());
    tokio::spawn(LogPersistence::run(pool.clone(), test.event_bus.subscribe()));

    let response = post_json(
        test.app(),
        "/api/v1/projects",
        submission("Website", test_today()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    wait_for_logs(&pool, 1).await;

    let response = get_auth(
        test.app(),
        "/api/v1/logs?logger_name=projects",
        &test.token_for(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    let entry = &json["data"][0];
    assert_eq!(entry["logger_name"], "projects");
    assert_eq!(entry["interacted_by"], "");
    assert!(entry["message"]
        .as_str()
        .unwrap()
        .contains("Website (NEW, Priority: MEDIUM)"));
    assert_eq!(entry["created_at"], "2030-06-15T12:00:00Z");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_actions_record_username(pool: PgPool) {
    let admin = create_user(&pool, "root", "admin").await;
    let test = common::build_test_app(pool.clone());
    tokio::spawn(LogPersistence::run(pool.clone(), test.event_bus.subscribe()));

    let token = test.token_for(&admin);
    let response = common::post_json_auth(
        test.app(),
        "/api/v1/categories",
        serde_json::json!({ "name": "Design" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    wait_for_logs(&pool, 1).await;

    let response = get_auth(test.app(), "/api/v1/logs?logger_name=categories", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["interacted_by"], "root");
    assert_eq!(json["data"][0]["message"], "Created category 'Design'");
}
