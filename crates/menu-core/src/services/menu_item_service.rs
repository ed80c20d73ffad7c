// ============================================================================
// Menu Core - Menu Item Service
// File: crates/menu-core/src/services/menu_item_service.rs
// ============================================================================
//! Ordered menu item collection: CRUD plus drag reordering.
//!
//! The ranking is "monotonic but possibly sparse": appends take the current
//! collection size, deletes leave gaps, and two appends racing on the same
//! size end up with equal orders. Display order stays deterministic because
//! [`sort_for_display`] breaks ties on the store id. No version tokens are
//! kept, so concurrent editors are last-write-wins per field (update) and per
//! ranking (reorder).

use std::collections::HashSet;
use std::sync::Arc;

use menu_shared::constants::MENU_ITEMS_KIND;
use menu_shared::types::DocumentId;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::domain::{MenuItem, MenuItemDraft, MenuItemPatch};
use crate::error::DomainError;
use crate::repositories::{Document, DocumentStore, Fields};
use crate::services::ordering::{
    assign_positions, compaction_plan, inspect_ranking, sort_for_display, OrderAssignment,
};

pub struct MenuItemService<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> MenuItemService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All items in display order.
    pub async fn list(&self) -> Result<Vec<MenuItem>, DomainError> {
        let documents = self.store.list(MENU_ITEMS_KIND).await.map_err(|e| {
            error!("Failed to list menu items: {}", e);
            DomainError::from(e)
        })?;

        let mut items = decode_items(documents);
        sort_for_display(&mut items);

        let report = inspect_ranking(&items);
        if !report.is_dense() {
            warn!(
                duplicates = ?report.duplicates,
                gaps = ?report.gaps,
                unranked = report.unranked,
                "Stored menu ranking is not dense"
            );
        }

        Ok(items)
    }

    pub async fn find(&self, id: &str) -> Result<MenuItem, DomainError> {
        self.list()
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| DomainError::NotFound {
                kind: MENU_ITEMS_KIND.to_string(),
                id: id.to_string(),
            })
    }

    /// Appends a new item at `order = current collection size`.
    pub async fn add(&self, draft: MenuItemDraft) -> Result<MenuItem, DomainError> {
        let draft = draft.normalized().map_err(|e| {
            warn!("Rejected menu item draft: {}", e);
            e
        })?;

        // Read-then-append: a concurrent add can observe the same size.
        let size = self.store.list(MENU_ITEMS_KIND).await?.len();
        let order = u32::try_from(size)
            .map_err(|_| DomainError::InternalError("menu collection too large".to_string()))?;

        let fields = draft.into_fields(order)?;
        let id = self
            .store
            .create(MENU_ITEMS_KIND, fields.clone())
            .await
            .map_err(|e| {
                error!("Failed to create menu item: {}", e);
                DomainError::from(e)
            })?;

        info!("Menu item created: {} (order {})", id, order);
        Document::new(id, fields).decode()
    }

    /// Writes only the fields present in `patch`.
    pub async fn update(&self, id: &str, patch: MenuItemPatch) -> Result<(), DomainError> {
        let patch = patch.normalized().map_err(|e| {
            warn!("Rejected update for menu item {}: {}", id, e);
            e
        })?;

        let fields = patch.to_fields()?;
        debug!("Updating menu item {} fields {:?}", id, fields.keys().collect::<Vec<_>>());
        self.store.update(MENU_ITEMS_KIND, id, fields).await?;

        info!("Menu item updated: {}", id);
        Ok(())
    }

    /// Removes the item. Remaining orders are not renormalized.
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.store.delete(MENU_ITEMS_KIND, id).await?;
        info!("Menu item deleted: {}", id);
        Ok(())
    }

    /// Sets `order = index` for every id in one atomic batch.
    ///
    /// Ids that are no longer stored are skipped; the remaining ids keep the
    /// index they have in `ordered_ids`. Stored items missing from
    /// `ordered_ids` keep their order, which may then collide with a newly
    /// assigned index.
    pub async fn reorder(
        &self,
        ordered_ids: &[DocumentId],
    ) -> Result<Vec<OrderAssignment>, DomainError> {
        let assignments = assign_positions(ordered_ids)?;
        if assignments.is_empty() {
            return Ok(assignments);
        }

        let stored: HashSet<DocumentId> = self
            .store
            .list(MENU_ITEMS_KIND)
            .await
            .map_err(|e| {
                error!("Failed to read menu before reorder: {}", e);
                DomainError::from(e)
            })?
            .into_iter()
            .map(|doc| doc.id)
            .collect();

        let (assignments, vanished): (Vec<_>, Vec<_>) = assignments
            .into_iter()
            .partition(|a| stored.contains(&a.id));
        if !vanished.is_empty() {
            warn!(
                "Reorder skipped {} ids no longer in the menu: {:?}",
                vanished.len(),
                vanished.iter().map(|a| a.id.as_str()).collect::<Vec<_>>()
            );
        }
        if assignments.is_empty() {
            return Ok(assignments);
        }

        self.persist_orders(&assignments).await?;
        info!("Menu reordered: {} items", assignments.len());
        Ok(assignments)
    }

    /// Rewrites the ranking as a dense 0..N-1 sequence in display order.
    pub async fn compact(&self) -> Result<Vec<OrderAssignment>, DomainError> {
        let items = self.list().await?;
        let plan = compaction_plan(&items);
        if plan.is_empty() {
            debug!("Menu ranking already dense");
            return Ok(plan);
        }

        self.persist_orders(&plan).await?;
        info!("Menu ranking compacted: {} items moved", plan.len());
        Ok(plan)
    }

    async fn persist_orders(&self, assignments: &[OrderAssignment]) -> Result<(), DomainError> {
        let updates = assignments
            .iter()
            .map(|a| (a.id.clone(), order_fields(a.order)))
            .collect();

        self.store
            .batch_update(MENU_ITEMS_KIND, updates)
            .await
            .map_err(|e| {
                error!("Failed to persist menu order: {}", e);
                DomainError::from(e)
            })
    }
}

fn order_fields(order: u32) -> Fields {
    let mut fields = Fields::new();
    fields.insert("order".to_string(), Value::from(order));
    fields
}

fn decode_items(documents: Vec<Document>) -> Vec<MenuItem> {
    documents
        .into_iter()
        .filter_map(|doc| {
            let id = doc.id.clone();
            match doc.decode::<MenuItem>() {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!("Skipping menu item {}: {}", id, e);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::repositories::MockDocumentStore;
    use serde_json::json;

    fn doc(id: &str, order: Option<u32>) -> Document {
        let mut value = json!({ "name": id, "price": 1.0, "rating": 4.0, "categoryId": "mains" });
        if let Some(order) = order {
            value["order"] = json!(order);
        }
        match value {
            Value::Object(fields) => Document::new(id, fields),
            _ => unreachable!(),
        }
    }

    fn ids(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_sorts_and_skips_malformed_documents() {
        let mut store = MockDocumentStore::new();
        store.expect_list().withf(|kind| kind == "menu").returning(|_| {
            let mut broken = Fields::new();
            broken.insert("price".to_string(), json!("free"));
            Ok(vec![
                doc("c", None),
                doc("b", Some(1)),
                Document::new("x", broken),
                doc("a", Some(0)),
            ])
        });

        let service = MenuItemService::new(Arc::new(store));
        let items = service.list().await.unwrap();
        assert_eq!(ids(&items), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_list_surfaces_transport_error() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list()
            .returning(|_| Err(StoreError::Transport("unavailable".to_string())));

        let service = MenuItemService::new(Arc::new(store));
        assert_eq!(
            service.list().await,
            Err(DomainError::Transport("unavailable".to_string()))
        );
    }

    #[tokio::test]
    async fn test_add_appends_at_collection_size() {
        let mut store = MockDocumentStore::new();
        // Sparse stored orders: size wins over max(order) + 1.
        store
            .expect_list()
            .times(1)
            .returning(|_| Ok(vec![doc("a", Some(0)), doc("b", Some(7))]));
        store
            .expect_create()
            .times(1)
            .withf(|kind, fields| kind == "menu" && fields.get("order") == Some(&json!(2)))
            .returning(|_, _| Ok("new-id".to_string()));

        let service = MenuItemService::new(Arc::new(store));
        let added = service
            .add(MenuItemDraft::new("Croissant", 3.5, "pastry"))
            .await
            .unwrap();

        assert_eq!(added.id, "new-id");
        assert_eq!(added.order, Some(2));
        assert_eq!(added.name, "Croissant");
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_draft_before_store_call() {
        // No expectations: any store call panics.
        let service = MenuItemService::new(Arc::new(MockDocumentStore::new()));

        let err = service
            .add(MenuItemDraft::new("", 2.0, "pastry"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref fields, .. } if fields == &vec!["name".to_string()]));
    }

    #[tokio::test]
    async fn test_non_finite_numbers_never_reach_store() {
        // No expectations: any store call panics.
        let service = MenuItemService::new(Arc::new(MockDocumentStore::new()));

        for draft in [
            MenuItemDraft::new("Ghost", f64::NAN, "mains"),
            MenuItemDraft::new("Ghost", f64::INFINITY, "mains"),
            MenuItemDraft { rating: f64::NAN, ..MenuItemDraft::new("Ghost", 2.0, "mains") },
        ] {
            let err = service.add(draft).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation { .. }), "got {:?}", err);
        }

        for patch in [
            MenuItemPatch { price: Some(f64::NAN), ..Default::default() },
            MenuItemPatch { price: Some(f64::INFINITY), ..Default::default() },
            MenuItemPatch { rating: Some(f64::NAN), ..Default::default() },
        ] {
            let err = service.update("a", patch).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation { .. }), "got {:?}", err);
        }
    }

    #[tokio::test]
    async fn test_update_validates_at_store_level() {
        let service = MenuItemService::new(Arc::new(MockDocumentStore::new()));

        let err = service
            .update(
                "a",
                MenuItemPatch {
                    price: Some(-5.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_writes_only_given_fields() {
        let mut store = MockDocumentStore::new();
        store
            .expect_update()
            .times(1)
            .withf(|kind, id, fields| {
                kind == "menu" && id == "a" && fields.len() == 1 && fields.get("name") == Some(&json!("Flan"))
            })
            .returning(|_, _, _| Ok(()));

        let service = MenuItemService::new(Arc::new(store));
        service
            .update(
                "a",
                MenuItemPatch {
                    name: Some(" Flan ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let mut store = MockDocumentStore::new();
        store.expect_update().returning(|kind, id, _| {
            Err(StoreError::NotFound {
                kind: kind.to_string(),
                id: id.to_string(),
            })
        });

        let service = MenuItemService::new(Arc::new(store));
        let err = service
            .update("ghost", MenuItemPatch { rating: Some(3.0), ..Default::default() })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let mut store = MockDocumentStore::new();
        store.expect_delete().returning(|kind, id| {
            Err(StoreError::NotFound {
                kind: kind.to_string(),
                id: id.to_string(),
            })
        });

        let service = MenuItemService::new(Arc::new(store));
        assert!(service.delete("ghost").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_reorder_persists_one_batch_of_indices() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list()
            .returning(|_| Ok(vec![doc("a", Some(0)), doc("b", Some(1)), doc("c", Some(2))]));
        store
            .expect_batch_update()
            .times(1)
            .withf(|kind, updates| {
                let written: Vec<(&str, Option<&Value>)> = updates
                    .iter()
                    .map(|(id, fields)| (id.as_str(), fields.get("order")))
                    .collect();
                kind == "menu"
                    && written
                        == vec![
                            ("c", Some(&json!(0))),
                            ("a", Some(&json!(1))),
                            ("b", Some(&json!(2))),
                        ]
            })
            .returning(|_, _| Ok(()));

        let service = MenuItemService::new(Arc::new(store));
        let assignments = service
            .reorder(&["c".to_string(), "a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(assignments.len(), 3);
        assert_eq!(assignments[0], OrderAssignment { id: "c".into(), order: 0 });
    }

    #[tokio::test]
    async fn test_reorder_skips_ids_removed_meanwhile() {
        let mut store = MockDocumentStore::new();
        // "2" was deleted by another editor.
        store
            .expect_list()
            .returning(|_| Ok(vec![doc("1", Some(0)), doc("3", Some(2))]));
        store
            .expect_batch_update()
            .times(1)
            .withf(|_, updates| {
                let written: Vec<(&str, Option<&Value>)> = updates
                    .iter()
                    .map(|(id, fields)| (id.as_str(), fields.get("order")))
                    .collect();
                written == vec![("3", Some(&json!(0))), ("1", Some(&json!(2)))]
            })
            .returning(|_, _| Ok(()));

        let service = MenuItemService::new(Arc::new(store));
        let assignments = service
            .reorder(&["3".to_string(), "2".to_string(), "1".to_string()])
            .await
            .unwrap();
        assert_eq!(
            assignments,
            vec![
                OrderAssignment { id: "3".into(), order: 0 },
                OrderAssignment { id: "1".into(), order: 2 },
            ]
        );
    }

    #[tokio::test]
    async fn test_reorder_with_only_vanished_ids_writes_nothing() {
        let mut store = MockDocumentStore::new();
        store.expect_list().returning(|_| Ok(vec![doc("1", Some(0))]));

        let service = MenuItemService::new(Arc::new(store));
        assert!(service.reorder(&["ghost".to_string()]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reorder_empty_is_noop() {
        let service = MenuItemService::new(Arc::new(MockDocumentStore::new()));
        assert!(service.reorder(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reorder_failure_propagates() {
        let mut store = MockDocumentStore::new();
        store.expect_list().returning(|_| Ok(vec![doc("a", Some(0))]));
        store
            .expect_batch_update()
            .returning(|_, _| Err(StoreError::Transport("permission denied".to_string())));

        let service = MenuItemService::new(Arc::new(store));
        let err = service.reorder(&["a".to_string()]).await.unwrap_err();
        assert_eq!(err, DomainError::Transport("permission denied".to_string()));
    }

    #[tokio::test]
    async fn test_compact_moves_only_out_of_place_items() {
        let mut store = MockDocumentStore::new();
        store
            .expect_list()
            .returning(|_| Ok(vec![doc("a", Some(0)), doc("c", Some(2)), doc("d", Some(9))]));
        store
            .expect_batch_update()
            .times(1)
            .withf(|_, updates| {
                updates.len() == 2
                    && updates[0].0 == "c"
                    && updates[0].1.get("order") == Some(&json!(1))
                    && updates[1].0 == "d"
                    && updates[1].1.get("order") == Some(&json!(2))
            })
            .returning(|_, _| Ok(()));

        let service = MenuItemService::new(Arc::new(store));
        assert_eq!(service.compact().await.unwrap().len(), 2);
    }
}
