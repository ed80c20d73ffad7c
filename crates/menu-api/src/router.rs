// ============================================================================
// Menu API - Router
// File: crates/menu-api/src/router.rs
// ============================================================================

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{categories, catalog, health, items, uploads};
use crate::state::AppState;

/// Public menu, admin API, uploads and the static upload directory.
/// CORS and request tracing are layered on by the binary.
pub fn build_router(state: AppState, uploads_dir: impl AsRef<Path>, max_upload_bytes: usize) -> Router {
    let admin = Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/order", put(items::reorder_items))
        .route("/items/compact", post(items::compact_items))
        .route("/items/{id}", patch(items::update_item).delete(items::delete_item))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            patch(categories::rename_category).delete(categories::delete_category),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/menu", get(catalog::menu_page))
        .route("/api/menu/items/{id}", get(catalog::item_detail))
        .nest("/api/admin", admin)
        .route(
            "/api/uploads",
            post(uploads::upload_handler).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .nest_service("/uploads", ServeDir::new(uploads_dir.as_ref()))
        .with_state(state)
}
