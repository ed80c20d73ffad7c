//! Document store selected by configuration.

use async_trait::async_trait;
use tracing::{error, info};

use menu_core::error::StoreError;
use menu_core::repositories::{Document, DocumentStore, Fields};
use menu_shared::config::{DatabaseBackend, DatabaseSettings};
use menu_shared::types::DocumentId;

use crate::database::{create_pool, PgDocumentStore};
use crate::memory::InMemoryDocumentStore;

pub enum DocumentBackend {
    Memory(InMemoryDocumentStore),
    Postgres(PgDocumentStore),
}

impl DocumentBackend {
    /// Opens the configured backend. Postgres gets its schema created on connect.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        match settings.backend {
            DatabaseBackend::Memory => {
                info!("Using in-memory document store");
                Ok(Self::Memory(InMemoryDocumentStore::new()))
            }
            DatabaseBackend::Postgres => {
                let pool = create_pool(settings).await.map_err(|e| {
                    error!("Failed to connect to database: {}", e);
                    StoreError::Transport(e.to_string())
                })?;
                let store = PgDocumentStore::new(pool);
                store.ensure_schema().await?;
                info!("Using PostgreSQL document store");
                Ok(Self::Postgres(store))
            }
        }
    }

    pub fn in_memory() -> Self {
        Self::Memory(InMemoryDocumentStore::new())
    }

    pub fn as_memory(&self) -> Option<&InMemoryDocumentStore> {
        match self {
            Self::Memory(store) => Some(store),
            Self::Postgres(_) => None,
        }
    }
}

#[async_trait]
impl DocumentStore for DocumentBackend {
    async fn list(&self, kind: &str) -> Result<Vec<Document>, StoreError> {
        match self {
            Self::Memory(store) => store.list(kind).await,
            Self::Postgres(store) => store.list(kind).await,
        }
    }

    async fn create(&self, kind: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        match self {
            Self::Memory(store) => store.create(kind, fields).await,
            Self::Postgres(store) => store.create(kind, fields).await,
        }
    }

    async fn update(&self, kind: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.update(kind, id, fields).await,
            Self::Postgres(store) => store.update(kind, id, fields).await,
        }
    }

    async fn delete(&self, kind: &str, id: &str) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.delete(kind, id).await,
            Self::Postgres(store) => store.delete(kind, id).await,
        }
    }

    async fn batch_update(
        &self,
        kind: &str,
        updates: Vec<(DocumentId, Fields)>,
    ) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.batch_update(kind, updates).await,
            Self::Postgres(store) => store.batch_update(kind, updates).await,
        }
    }
}
