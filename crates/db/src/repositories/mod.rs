//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_log_repo;
pub mod attachment_repo;
pub mod category_repo;
pub mod project_comment_repo;
pub mod project_repo;
pub mod user_repo;

pub use application_log_repo::ApplicationLogRepo;
pub use attachment_repo::AttachmentRepo;
pub use category_repo::CategoryRepo;
pub use project_comment_repo::ProjectCommentRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: i64 = 50;

/// Largest page a caller may request.
pub const MAX_LIMIT: i64 = 200;

/// Clamp a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
