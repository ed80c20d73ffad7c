// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: Menu item record, creation draft and partial update
// ============================================================================

use menu_shared::constants::DEFAULT_RATING;
use menu_shared::types::DocumentId;
use menu_shared::utils::non_blank;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::DomainError;
use crate::repositories::Fields;

/// Menu item as stored in the `menu` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: DocumentId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: String,
    /// Position in the whole collection. Values that are not a non-negative
    /// integer are read as unranked.
    #[serde(
        default,
        deserialize_with = "lenient_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<u32>,
}

fn default_rating() -> f64 {
    DEFAULT_RATING
}

fn lenient_order<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_u64())
        .and_then(|v| u32::try_from(v).ok()))
}

impl MenuItem {
    /// Merges the provided fields of `patch` into this item.
    pub fn apply_patch(&mut self, patch: &MenuItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(image) = &patch.image {
            self.image = Some(image.clone());
        }
        if let Some(category_id) = &patch.category_id {
            self.category_id = category_id.clone();
        }
        if let Some(order) = patch.order {
            self.order = Some(order);
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Fields submitted by the admin form when adding an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDraft {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[serde(default = "default_rating")]
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,
}

impl MenuItemDraft {
    pub fn new(name: &str, price: f64, category_id: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            price,
            rating: DEFAULT_RATING,
            image: None,
            category_id: category_id.to_string(),
        }
    }

    /// Trims text fields and validates the result.
    pub fn normalized(self) -> Result<Self, DomainError> {
        let draft = Self {
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
            price: self.price,
            rating: self.rating,
            image: non_blank(self.image),
            category_id: self.category_id.trim().to_string(),
        };
        ensure_finite(&[("price", Some(draft.price)), ("rating", Some(draft.rating))])?;
        draft.validate()?;
        Ok(draft)
    }

    /// Document fields for a new record placed at `order`.
    pub fn into_fields(self, order: u32) -> Result<Fields, DomainError> {
        let mut fields = to_fields(&self)?;
        fields.insert("order".to_string(), Value::from(order));
        Ok(fields)
    }
}

/// Partial update. Only `Some` fields are written; `order` is untouched unless set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,

    /// An empty string clears the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl MenuItemPatch {
    pub fn normalized(self) -> Result<Self, DomainError> {
        let patch = Self {
            name: self.name.map(|n| n.trim().to_string()),
            category_id: self.category_id.map(|c| c.trim().to_string()),
            ..self
        };
        ensure_finite(&[("price", patch.price), ("rating", patch.rating)])?;
        patch.validate()?;
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_fields(&self) -> Result<Fields, DomainError> {
        to_fields(self)
    }
}

/// Range checks pass NaN and infinities, which serialize as `null`.
fn ensure_finite(values: &[(&str, Option<f64>)]) -> Result<(), DomainError> {
    let invalid: Vec<&str> = values
        .iter()
        .filter(|(_, value)| value.is_some_and(|v| !v.is_finite()))
        .map(|(field, _)| *field)
        .collect();
    if invalid.is_empty() {
        return Ok(());
    }
    Err(DomainError::Validation {
        fields: invalid.iter().map(|field| field.to_string()).collect(),
        message: invalid
            .iter()
            .map(|field| format!("{} must be a finite number", field))
            .collect::<Vec<_>>()
            .join("; "),
    })
}

fn to_fields<T: Serialize>(value: &T) -> Result<Fields, DomainError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(DomainError::InternalError("record did not serialize to an object".to_string())),
        Err(e) => Err(DomainError::InternalError(e.to_string())),
    }
}
