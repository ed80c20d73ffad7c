//! Object storage trait (port)

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores a publicly readable object under `key` and returns its URL.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<String, StoreError>;
}
