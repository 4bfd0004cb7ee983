//! Filesystem-backed media storage.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::keys::object_key;
use crate::{MediaError, MediaStorage, StoredMedia};

/// Stores objects under `root`, serving them from `base_url`.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve `key` under the root, refusing anything that would escape it.
    fn path_for(&self, key: &str) -> Result<PathBuf, MediaError> {
        let relative = Path::new(key);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(MediaError::Provider(format!("Invalid media key '{key}'")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredMedia, MediaError> {
        let key = object_key(folder, file_name);
        let path = self.path_for(&key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &bytes).await?;

        tracing::debug!(key = %key, size = bytes.len(), "Stored media on local disk");
        Ok(StoredMedia {
            url: format!("{}/{key}", self.base_url),
            key,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), MediaError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
