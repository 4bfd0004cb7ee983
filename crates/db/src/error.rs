use intake_core::error::CoreError;

/// Failure of a save that validates domain rules before writing.
///
/// Repositories that only wrap SQL return `sqlx::Error` directly; this type
/// is used where a save can also be refused by a [`CoreError`] rule.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The save was refused before anything was written.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
