// ============================================================================
// Menu Core - Category Service
// File: crates/menu-core/src/services/category_service.rs
// ============================================================================
//! Category management for the admin panel.

use std::sync::Arc;

use menu_shared::constants::CATEGORIES_KIND;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::{Category, CategoryDraft};
use crate::error::DomainError;
use crate::repositories::{DocumentStore, Fields};

pub struct CategoryService<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> CategoryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Categories in store order.
    pub async fn list(&self) -> Result<Vec<Category>, DomainError> {
        let documents = self.store.list(CATEGORIES_KIND).await.map_err(|e| {
            error!("Failed to list categories: {}", e);
            DomainError::from(e)
        })?;

        Ok(documents
            .into_iter()
            .filter_map(|doc| {
                let id = doc.id.clone();
                doc.decode::<Category>()
                    .map_err(|e| warn!("Skipping category {}: {}", id, e))
                    .ok()
            })
            .collect())
    }

    pub async fn create(&self, name: &str) -> Result<Category, DomainError> {
        let draft = CategoryDraft::new(name)?;
        let id = self.store.create(CATEGORIES_KIND, name_fields(&draft.name)).await?;

        info!("Category created: {} ({})", draft.name, id);
        Ok(Category { id, name: draft.name })
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<(), DomainError> {
        let draft = CategoryDraft::new(name)?;
        self.store
            .update(CATEGORIES_KIND, id, name_fields(&draft.name))
            .await?;

        info!("Category renamed: {} -> {}", id, draft.name);
        Ok(())
    }

    /// Items pointing at a deleted category are left as they are.
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.store.delete(CATEGORIES_KIND, id).await?;
        info!("Category deleted: {}", id);
        Ok(())
    }
}

fn name_fields(name: &str) -> Fields {
    let mut fields = Fields::new();
    fields.insert("name".to_string(), Value::String(name.to_string()));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{Document, MockDocumentStore};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_keeps_store_order() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list()
            .withf(|kind| kind == "categories")
            .returning(|_| {
                Ok(vec![
                    Document::new("z", name_fields("Pizza")),
                    Document::new("a", name_fields("Burgers")),
                ])
            });

        let service = CategoryService::new(Arc::new(store));
        let names: Vec<String> = service.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Pizza", "Burgers"]);
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let mut store = MockDocumentStore::new();
        store
            .expect_create()
            .withf(|kind, fields| kind == "categories" && fields.get("name") == Some(&json!("Drinks")))
            .returning(|_, _| Ok("cat-1".to_string()));

        let service = CategoryService::new(Arc::new(store));
        let category = service.create("  Drinks ").await.unwrap();
        assert_eq!(category, Category { id: "cat-1".into(), name: "Drinks".into() });
    }

    #[tokio::test]
    async fn test_rename_rejects_blank_name() {
        let service = CategoryService::new(Arc::new(MockDocumentStore::new()));
        assert!(matches!(
            service.rename("cat-1", " ").await,
            Err(DomainError::Validation { .. })
        ));
    }
}
