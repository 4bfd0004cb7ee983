#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use intake_api::auth::jwt::{generate_access_token, JwtConfig};
use intake_api::auth::password::hash_password;
use intake_api::config::ServerConfig;
use intake_api::router::build_app_router;
use intake_api::state::AppState;
use intake_core::clock::FixedClock;
use intake_core::types::{Date, Timestamp};
use intake_db::models::user::{CreateUser, User};
use intake_db::repositories::UserRepo;
use intake_events::EventBus;
use intake_media::local::LocalMediaStorage;
use intake_media::{MediaBackend, MediaConfig, MediaStorage};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

/// Password used for every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "test-password-123";

/// Boundary used by [`post_multipart`].
const BOUNDARY: &str = "----intake-test-boundary";

/// The instant every test app starts at: 2030-06-15 12:00 UTC.
pub fn test_now() -> Timestamp {
    Utc.with_ymd_and_hms(2030, 6, 15, 12, 0, 0).unwrap()
}

/// The calendar date of [`test_now`].
pub fn test_today() -> Date {
    test_now().date_naive()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(media_root: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        media: MediaConfig {
            backend: MediaBackend::Local {
                root: media_root.to_path_buf(),
                base_url: "/media".to_string(),
            },
        },
    }
}

/// A router plus the handles tests need to steer and inspect it.
pub struct TestApp {
    pub router: Router,
    pub config: ServerConfig,
    pub clock: Arc<FixedClock>,
    pub event_bus: Arc<EventBus>,
    /// Kept alive for the duration of the test; files land here.
    pub media_root: TempDir,
}

impl TestApp {
    /// A fresh handle to the router for one request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Bearer token for `user`, signed with the test secret.
    pub fn token_for(&self, user: &User) -> String {
        generate_access_token(user.id, &user.username, &user.role, &self.config.jwt)
            .expect("token generation should succeed")
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool, a [`FixedClock`] at [`test_now`] and local media
/// storage in a temporary directory.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with_media(pool, |root| {
        Arc::new(LocalMediaStorage::new(root, "/media")) as Arc<dyn MediaStorage>
    })
}

/// Like [`build_test_app`], with the media backend built by `make_media`
/// from the temporary media root.
pub fn build_test_app_with_media(
    pool: PgPool,
    make_media: impl FnOnce(&std::path::Path) -> Arc<dyn MediaStorage>,
) -> TestApp {
    let media_root = tempfile::tempdir().expect("tempdir should be created");
    let config = test_config(media_root.path());
    let clock = Arc::new(FixedClock::new(test_now()));
    let event_bus = Arc::new(EventBus::default());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock: clock.clone(),
        event_bus: Arc::clone(&event_bus),
        media: make_media(media_root.path()),
    };

    TestApp {
        router: build_app_router(state, &config),
        config,
        clock,
        event_bus,
        media_root,
    }
}

/// Create a user directly in the database with [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Read the full response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Read the full response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, json_request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, json_request(Method::GET, uri, None, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, Some(body), None)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(body), Some(token))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, json_request(Method::POST, uri, None, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::PUT, uri, Some(body), Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, json_request(Method::DELETE, uri, None, Some(token))).await
}

/// POST a single-file `multipart/form-data` body with the file under `field`.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    field: &str,
    file_name: &str,
    contents: &[u8],
) -> Response {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// A valid submission body due `deadline`.
pub fn submission(title: &str, deadline: Date) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": "Company website refresh",
        "budget": "1500.00",
        "deadline": deadline,
        "sender_name": "Ana Client",
        "contact_email": "ana@example.com",
    })
}
