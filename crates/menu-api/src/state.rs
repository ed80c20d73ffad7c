use std::sync::Arc;

use menu_core::services::{CategoryService, MenuItemService, UploadService};
use menu_infrastructure::{DocumentBackend, LocalObjectStorage};

#[derive(Clone)]
pub struct AppState {
    pub items: Arc<MenuItemService<DocumentBackend>>,
    pub categories: Arc<CategoryService<DocumentBackend>>,
    pub uploads: Arc<UploadService<LocalObjectStorage>>,
}

impl AppState {
    pub fn new(
        store: Arc<DocumentBackend>,
        storage: Arc<LocalObjectStorage>,
        upload_prefix: &str,
    ) -> Self {
        Self {
            items: Arc::new(MenuItemService::new(store.clone())),
            categories: Arc::new(CategoryService::new(store)),
            uploads: Arc::new(UploadService::new(storage, upload_prefix)),
        }
    }
}
