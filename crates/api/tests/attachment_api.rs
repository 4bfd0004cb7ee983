//! HTTP-level integration tests for attachment upload and removal, backed by
//! local media storage in a temporary directory.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{
    body_bytes, body_json, create_user, delete_auth, get, get_auth, post_json, post_multipart,
    submission, test_today,
};
use intake_db::repositories::AttachmentRepo;
use intake_media::local::LocalMediaStorage;
use intake_media::{MediaError, MediaStorage, StoredMedia};
use sqlx::PgPool;

/// Local storage that removes every project once a file is stored, so the
/// attachment insert that follows fails its foreign key.
struct ProjectVanishesDuringUpload {
    inner: LocalMediaStorage,
    pool: PgPool,
}

#[async_trait]
impl MediaStorage for ProjectVanishesDuringUpload {
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredMedia, MediaError> {
        let stored = self.inner.upload(folder, file_name, bytes).await?;
        sqlx::query("DELETE FROM projects")
            .execute(&self.pool)
            .await
            .map_err(|e| MediaError::Provider(e.to_string()))?;
        Ok(stored)
    }

    async fn delete(&self, key: &str) -> Result<(), MediaError> {
        self.inner.delete(key).await
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

fn stored_files(root: &std::path::Path) -> usize {
    match std::fs::read_dir(root.join("attachments")) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}

async fn submit(test: &common::TestApp) -> i64 {
    let response = post_json(
        test.app(),
        "/api/v1/projects",
        submission("Website", test_today()),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_stores_file_and_row(pool: PgPool) {
    let test = common::build_test_app(pool);
    let id = submit(&test).await;

    let response = post_multipart(
        test.app(),
        &format!("/api/v1/projects/{id}/attachments"),
        "file",
        "brief.pdf",
        b"%PDF-1.4 brief",
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["project_id"], id);
    assert_eq!(json["original_name"], "brief.pdf");

    let key = json["file"].as_str().unwrap();
    assert!(key.starts_with("attachments/"));
    assert!(key.ends_with("_brief.pdf"));
    assert_eq!(json["file_url"], format!("/media/{key}"));

    let stored = std::fs::read(test.media_root.path().join(key)).unwrap();
    assert_eq!(stored, b"%PDF-1.4 brief");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_uploaded_file_is_served_at_its_url(pool: PgPool) {
    let test = common::build_test_app(pool);
    let id = submit(&test).await;

    let response = post_multipart(
        test.app(),
        &format!("/api/v1/projects/{id}/attachments"),
        "file",
        "brief.pdf",
        b"%PDF-1.4 brief",
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let url = json["file_url"].as_str().unwrap();

    let response = get(test.app(), url).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"%PDF-1.4 brief");

    let response = get(test.app(), "/media/attachments/missing.pdf").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_long_file_name_is_clamped(pool: PgPool) {
    let test = common::build_test_app(pool);
    let id = submit(&test).await;
    let name = format!("{}.pdf", "a".repeat(300));

    let response = post_multipart(
        test.app(),
        &format!("/api/v1/projects/{id}/attachments"),
        "file",
        &name,
        b"%PDF-1.4",
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let original_name = json["original_name"].as_str().unwrap();
    assert_eq!(original_name.chars().count(), 255);
    assert!(original_name.ends_with(".pdf"));
    assert!(json["file"].as_str().unwrap().ends_with(".pdf"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_insert_removes_stored_file(pool: PgPool) {
    let test = common::build_test_app_with_media(pool.clone(), |root| {
        Arc::new(ProjectVanishesDuringUpload {
            inner: LocalMediaStorage::new(root, "/media"),
            pool: pool.clone(),
        }) as Arc<dyn MediaStorage>
    });
    let id = submit(&test).await;

    let response = post_multipart(
        test.app(),
        &format!("/api/v1/projects/{id}/attachments"),
        "file",
        "brief.pdf",
        b"%PDF-1.4",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert_eq!(stored_files(test.media_root.path()), 0);
    let rows: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM attachments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_requires_file_field(pool: PgPool) {
    let test = common::build_test_app(pool);
    let id = submit(&test).await;

    let response = post_multipart(
        test.app(),
        &format!("/api/v1/projects/{id}/attachments"),
        "document",
        "brief.pdf",
        b"data",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_to_missing_project_stores_nothing(pool: PgPool) {
    let test = common::build_test_app(pool);

    let response = post_multipart(
        test.app(),
        "/api/v1/projects/999999/attachments",
        "file",
        "brief.pdf",
        b"data",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(!test.media_root.path().join("attachments").exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_attachment_removes_row_and_file(pool: PgPool) {
    let staff = create_user(&pool, "dana", "staff").await;
    let test = common::build_test_app(pool.clone());
    let token = test.token_for(&staff);
    let id = submit(&test).await;

    let response = post_multipart(
        test.app(),
        &format!("/api/v1/projects/{id}/attachments"),
        "file",
        "logo.png",
        b"png-bytes",
    )
    .await;
    let json = body_json(response).await;
    let attachment_id = json["id"].as_i64().unwrap();
    let path = test.media_root.path().join(json["file"].as_str().unwrap());
    assert!(path.exists());

    let response = delete_auth(
        test.app(),
        &format!("/api/v1/projects/{id}/attachments/{attachment_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!path.exists());
    assert!(AttachmentRepo::find_by_id(&pool, attachment_id)
        .await
        .unwrap()
        .is_none());

    let response = delete_auth(
        test.app(),
        &format!("/api/v1/projects/{id}/attachments/{attachment_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_project_removes_its_attachments(pool: PgPool) {
    let staff = create_user(&pool, "dana", "staff").await;
    let test = common::build_test_app(pool.clone());
    let token = test.token_for(&staff);
    let id = submit(&test).await;

    for name in ["one.txt", "two.txt"] {
        let response = post_multipart(
            test.app(),
            &format!("/api/v1/projects/{id}/attachments"),
            "file",
            name,
            b"text",
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(
        test.app(),
        &format!("/api/v1/projects/{id}/attachments"),
        &token,
    )
    .await;
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let response = delete_auth(test.app(), &format!("/api/v1/projects/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(AttachmentRepo::list_by_project(&pool, id)
        .await
        .unwrap()
        .is_empty());
    for attachment in listed.as_array().unwrap() {
        let path = test
            .media_root
            .path()
            .join(attachment["file"].as_str().unwrap());
        assert!(!path.exists());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_attachments_requires_staff(pool: PgPool) {
    let test = common::build_test_app(pool);
    let id = submit(&test).await;

    let response = common::get(test.app(), &format!("/api/v1/projects/{id}/attachments")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
