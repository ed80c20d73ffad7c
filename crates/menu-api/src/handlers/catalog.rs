// ============================================================================
// Menu API - Catalog Handlers
// File: crates/menu-api/src/handlers/catalog.rs
// ============================================================================
//! Customer menu page. Store failures render an empty menu instead of an error.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use menu_core::services::{CatalogView, CategoryFilter, ItemDetail};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

pub async fn menu_page(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<ApiResponse<CatalogView>> {
    let filter = CategoryFilter::from_query(query.category.as_deref());

    let categories = state.categories.list().await.unwrap_or_else(|e| {
        warn!("Failed to load categories, showing none: {}", e);
        Vec::new()
    });
    let items = state.items.list().await.unwrap_or_else(|e| {
        warn!("Failed to load menu items, showing empty menu: {}", e);
        Vec::new()
    });

    Json(ApiResponse::success(CatalogView::build(categories, &items, &filter)))
}

pub async fn item_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ItemDetail>>, ApiError> {
    let item = state.items.find(&id).await?;
    let categories = state.categories.list().await.unwrap_or_else(|e| {
        warn!("Failed to load categories for item {}: {}", id, e);
        Vec::new()
    });

    Ok(Json(ApiResponse::success(ItemDetail::new(item, &categories))))
}
