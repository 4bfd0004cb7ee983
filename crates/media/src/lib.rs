//! Remote storage for uploaded attachment files.
//!
//! - [`MediaStorage`] -- the async trait the API talks to.
//! - [`cloudinary::CloudinaryStorage`] -- raw-file uploads to Cloudinary.
//! - [`local::LocalMediaStorage`] -- files on local disk, for development
//!   and tests.
//! - [`MediaConfig`] -- backend selection from environment variables.

use std::sync::Arc;

use async_trait::async_trait;

pub mod cloudinary;
pub mod config;
pub mod keys;
pub mod local;

pub use config::{MediaBackend, MediaConfig};

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered but refused the request.
    #[error("Storage provider error: {0}")]
    Provider(String),
}

/// A file that has been stored and can be fetched again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Backend-specific key used to delete the object later.
    pub key: String,
    /// Where clients can download the object.
    pub url: String,
}

/// A place to put uploaded bytes.
///
/// `upload` either stores the object and returns its reference or fails
/// without leaving a reference behind. Retries are up to the backend.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store `bytes` under `folder`, deriving the key from `file_name`.
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredMedia, MediaError>;

    /// Remove a stored object. Removing a missing object is not an error.
    async fn delete(&self, key: &str) -> Result<(), MediaError>;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}

/// Build the backend selected by `config`.
pub fn build_storage(config: &MediaConfig) -> Arc<dyn MediaStorage> {
    match &config.backend {
        MediaBackend::Local { root, base_url } => {
            Arc::new(local::LocalMediaStorage::new(root.clone(), base_url.clone()))
        }
        MediaBackend::Cloudinary {
            cloud_name,
            api_key,
            api_secret,
            signature_algorithm,
        } => Arc::new(
            cloudinary::CloudinaryStorage::new(
                cloud_name.clone(),
                api_key.clone(),
                api_secret.clone(),
            )
            .with_signature_algorithm(*signature_algorithm),
        ),
    }
}
