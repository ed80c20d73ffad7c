//! # Menu Core - Domain Module
//! 
//! Domain entities for the menu application.

pub mod menu_item;
pub mod category;

// Re-export all entities
pub use menu_item::{MenuItem, MenuItemDraft, MenuItemPatch};
pub use category::{Category, CategoryDraft};
