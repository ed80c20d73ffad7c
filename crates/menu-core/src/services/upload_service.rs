//! Image uploads for menu items.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use menu_shared::utils::normalize_file_name;
use serde::Serialize;
use tracing::{error, info};

use crate::error::DomainError;
use crate::repositories::ObjectStorage;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A file received from the admin form.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub data: Bytes,
    pub content_type: Option<String>,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedObject {
    pub url: String,
}

pub struct UploadService<O: ObjectStorage> {
    storage: Arc<O>,
    prefix: String,
}

impl<O: ObjectStorage> UploadService<O> {
    pub fn new(storage: Arc<O>, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
        }
    }

    /// Stores the file under a timestamp-prefixed key and returns its public URL.
    /// Nothing is retried.
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadedObject, DomainError> {
        if request.data.is_empty() {
            return Err(DomainError::validation("file", "No file uploaded"));
        }

        let key = object_key(&self.prefix, Utc::now().timestamp_millis(), &request.file_name);
        let content_type = resolve_content_type(request.content_type.as_deref(), &request.file_name);
        let size = request.data.len();

        let url = self
            .storage
            .put(&key, request.data, &content_type)
            .await
            .map_err(|e| {
                error!("Upload error for {}: {}", key, e);
                DomainError::from(e)
            })?;

        info!("Uploaded {} ({} bytes, {})", key, size, content_type);
        Ok(UploadedObject { url })
    }
}

/// `{prefix}/{millis}_{file name with whitespace replaced by "_"}`.
pub fn object_key(prefix: &str, timestamp_millis: i64, file_name: &str) -> String {
    let name = normalize_file_name(file_name.trim());
    let name = if name.is_empty() { "upload".to_string() } else { name };
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{}_{}", timestamp_millis, name)
    } else {
        format!("{}/{}_{}", prefix, timestamp_millis, name)
    }
}

/// Declared type, else a guess from the file extension.
pub fn resolve_content_type(declared: Option<&str>, file_name: &str) -> String {
    match declared.map(str::trim) {
        Some(declared) if !declared.is_empty() => declared.to_string(),
        _ => mime_guess::from_path(file_name)
            .first_raw()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string(),
    }
}
