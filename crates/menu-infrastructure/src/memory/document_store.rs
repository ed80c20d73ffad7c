// ============================================================================
// Menu Infrastructure - In-Memory Document Store
// File: crates/menu-infrastructure/src/memory/document_store.rs
// ============================================================================
//! Process-local document store for development, demos and tests.
//!
//! Every call yields to the runtime once before touching the data, so
//! concurrent callers interleave the way they would against a remote store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use menu_core::error::StoreError;
use menu_core::repositories::{Document, DocumentStore, Fields};
use menu_shared::types::{new_document_id, DocumentId};

#[derive(Default)]
pub struct InMemoryDocumentStore {
    // Documents of each kind in insertion order.
    collections: RwLock<HashMap<String, Vec<Document>>>,
    unavailable: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document under a caller-chosen id, replacing any existing one.
    pub async fn insert_with_id(&self, kind: &str, id: &str, fields: Fields) {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(kind.to_string()).or_default();
        match documents.iter_mut().find(|doc| doc.id == id) {
            Some(existing) => existing.fields = fields,
            None => documents.push(Document::new(id, fields)),
        }
    }

    /// While set, every operation fails with a transport error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    async fn enter(&self, operation: &str, kind: &str) -> Result<(), StoreError> {
        tokio::task::yield_now().await;
        if self.unavailable.load(Ordering::SeqCst) {
            warn!("In-memory store unavailable: {} {}", operation, kind);
            return Err(StoreError::Transport("document store unavailable".to_string()));
        }
        Ok(())
    }
}

fn not_found(kind: &str, id: &str) -> StoreError {
    StoreError::NotFound {
        kind: kind.to_string(),
        id: id.to_string(),
    }
}

fn merge(target: &mut Fields, fields: Fields) {
    for (key, value) in fields {
        target.insert(key, value);
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list(&self, kind: &str) -> Result<Vec<Document>, StoreError> {
        self.enter("list", kind).await?;
        let collections = self.collections.read().await;
        Ok(collections.get(kind).cloned().unwrap_or_default())
    }

    async fn create(&self, kind: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        self.enter("create", kind).await?;
        let id = new_document_id();
        let mut collections = self.collections.write().await;
        collections
            .entry(kind.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));
        debug!("Created {}/{}", kind, id);
        Ok(id)
    }

    async fn update(&self, kind: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.enter("update", kind).await?;
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(kind)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| not_found(kind, id))?;
        merge(&mut document.fields, fields);
        Ok(())
    }

    async fn delete(&self, kind: &str, id: &str) -> Result<(), StoreError> {
        self.enter("delete", kind).await?;
        let mut collections = self.collections.write().await;
        let documents = collections.get_mut(kind).ok_or_else(|| not_found(kind, id))?;
        let index = documents
            .iter()
            .position(|doc| doc.id == id)
            .ok_or_else(|| not_found(kind, id))?;
        documents.remove(index);
        Ok(())
    }

    async fn batch_update(
        &self,
        kind: &str,
        updates: Vec<(DocumentId, Fields)>,
    ) -> Result<(), StoreError> {
        self.enter("batch_update", kind).await?;
        let mut collections = self.collections.write().await;
        let documents = collections.entry(kind.to_string()).or_default();

        // Resolve every target before writing anything.
        let mut positions = Vec::with_capacity(updates.len());
        for (id, _) in &updates {
            let index = documents
                .iter()
                .position(|doc| &doc.id == id)
                .ok_or_else(|| not_found(kind, id))?;
            positions.push(index);
        }

        for (index, (_, fields)) in positions.into_iter().zip(updates) {
            merge(&mut documents[index].fields, fields);
        }
        Ok(())
    }
}
