// ============================================================================
// Menu Core - Item List Session
// File: crates/menu-core/src/services/item_list_session.rs
// ============================================================================
//! Client-side copy of the menu item list for one admin session.
//!
//! Update, delete and drag reordering are applied locally before the store
//! confirms and are never rolled back: after a failed write the local list
//! can differ from the store until the next [`ItemListSession::refresh`].
//! Add waits for the store and only appends the confirmed record.

use std::sync::Arc;

use menu_shared::types::DocumentId;
use tracing::{error, warn};

use crate::domain::{Category, MenuItem, MenuItemDraft, MenuItemPatch};
use crate::error::DomainError;
use crate::repositories::DocumentStore;
use crate::services::catalog;
use crate::services::menu_item_service::MenuItemService;
use crate::services::ordering::{move_position, OrderAssignment};

pub struct ItemListSession<S: DocumentStore> {
    service: Arc<MenuItemService<S>>,
    items: Vec<MenuItem>,
}

impl<S: DocumentStore> ItemListSession<S> {
    pub fn new(service: Arc<MenuItemService<S>>) -> Self {
        Self {
            service,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn ids(&self) -> Vec<DocumentId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Reloads from the store. A failed read leaves an empty list.
    pub async fn refresh(&mut self) -> &[MenuItem] {
        self.items = match self.service.list().await {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to load menu items, showing empty list: {}", e);
                Vec::new()
            }
        };
        &self.items
    }

    pub async fn add(&mut self, draft: MenuItemDraft) -> Result<&MenuItem, DomainError> {
        let added = self.service.add(draft).await?;
        self.items.push(added);
        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    pub async fn update(&mut self, id: &str, patch: MenuItemPatch) -> Result<(), DomainError> {
        let patch = patch.normalized()?;
        if let Some(index) = self.position(id) {
            self.items[index].apply_patch(&patch);
        }

        self.service.update(id, patch).await.map_err(|e| {
            error!("Failed to save menu item {}: {}", id, e);
            e
        })
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), DomainError> {
        self.items.retain(|item| item.id != id);

        self.service.delete(id).await.map_err(|e| {
            error!("Failed to delete menu item {}: {}", id, e);
            e
        })
    }

    /// Drag release: moves `active_id` to the slot of `over_id` and persists
    /// the whole sequence. Returns `None` when nothing moved.
    pub async fn move_item(
        &mut self,
        active_id: &str,
        over_id: &str,
    ) -> Result<Option<Vec<OrderAssignment>>, DomainError> {
        if active_id == over_id {
            return Ok(None);
        }
        let (Some(from), Some(to)) = (self.position(active_id), self.position(over_id)) else {
            return Ok(None);
        };

        move_position(&mut self.items, from, to);

        let ordered_ids = self.ids();
        let assignments = self.service.reorder(&ordered_ids).await.map_err(|e| {
            error!("Failed to update order: {}", e);
            e
        })?;

        for assignment in &assignments {
            if let Some(item) = self.items.iter_mut().find(|item| item.id == assignment.id) {
                item.order = Some(assignment.order);
            }
        }
        Ok(Some(assignments))
    }

    /// Label for the item list row.
    pub fn category_name<'a>(&self, item: &MenuItem, categories: &'a [Category]) -> &'a str {
        catalog::category_name(categories, &item.category_id)
    }
}
