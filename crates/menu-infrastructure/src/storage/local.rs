// ============================================================================
// Menu Infrastructure - Local Object Storage
// File: crates/menu-infrastructure/src/storage/local.rs
// ============================================================================
//! Writes uploaded objects below a directory that the server exposes under
//! `public_base_url`. The content type is not persisted; the static file
//! service derives it from the key's extension.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, error};

use menu_core::error::StoreError;
use menu_core::repositories::ObjectStorage;
use menu_shared::config::StorageSettings;

pub struct LocalObjectStorage {
    root_dir: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(&settings.root_dir, settings.public_base_url.clone())
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !safe {
            return Err(StoreError::Transport(format!("invalid object key: {}", key)));
        }
        Ok(self.root_dir.join(relative))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<String, StoreError> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create upload directory {:?}: {}", parent, e);
                StoreError::Transport(e.to_string())
            })?;
        }

        tokio::fs::write(&path, &data).await.map_err(|e| {
            error!("Failed to write object {:?}: {}", path, e);
            StoreError::Transport(e.to_string())
        })?;

        debug!("Stored object {} ({} bytes, {})", key, data.len(), content_type);
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}
