//! Document store trait (port)

use async_trait::async_trait;
use menu_shared::types::DocumentId;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{DomainError, StoreError};

/// Field set of a stored document, without its id.
pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, fields: Fields) -> Self {
        Self { id: id.into(), fields }
    }

    /// Decodes the document into a record type carrying an `id` field.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, DomainError> {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id));
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| DomainError::InternalError(format!("malformed document: {}", e)))
    }
}

/// Schemaless document collections addressed by `kind`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document of `kind`, in store order.
    async fn list(&self, kind: &str) -> Result<Vec<Document>, StoreError>;

    /// Inserts a document and returns its store-assigned id.
    async fn create(&self, kind: &str, fields: Fields) -> Result<DocumentId, StoreError>;

    /// Shallow-merges `fields` into an existing document.
    async fn update(&self, kind: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    async fn delete(&self, kind: &str, id: &str) -> Result<(), StoreError>;

    /// Applies every update or none of them.
    async fn batch_update(
        &self,
        kind: &str,
        updates: Vec<(DocumentId, Fields)>,
    ) -> Result<(), StoreError>;
}
