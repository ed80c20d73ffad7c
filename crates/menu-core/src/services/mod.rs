//! Domain services (business logic)

pub mod ordering;
pub mod menu_item_service;
pub mod category_service;
pub mod catalog;
pub mod item_list_session;
pub mod upload_service;

pub use ordering::{OrderAssignment, RankingReport};
pub use menu_item_service::MenuItemService;
pub use category_service::CategoryService;
pub use catalog::{CatalogView, CategoryFilter, ItemDetail};
pub use item_list_session::ItemListSession;
pub use upload_service::{UploadRequest, UploadService, UploadedObject};
