// ============================================================================
// Menu Core - Category Entity
// File: crates/menu-core/src/domain/category.rs
// ============================================================================

use menu_shared::types::DocumentId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainError;

/// Category entity. Display order is the store's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: DocumentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CategoryDraft {
    #[validate(length(min = 1, max = 100, message = "Category name must be between 1 and 100 characters"))]
    pub name: String,
}

impl CategoryDraft {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let draft = Self {
            name: name.trim().to_string(),
        };
        draft.validate()?;
        Ok(draft)
    }
}
