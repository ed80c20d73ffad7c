// ============================================================================
// Menu API - Admin Item Handlers
// File: crates/menu-api/src/handlers/items.rs
// ============================================================================
//! Admin CRUD and reordering for menu items.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use menu_core::domain::{MenuItem, MenuItemDraft, MenuItemPatch};
use menu_core::services::OrderAssignment;
use menu_shared::types::DocumentId;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Full sequence of item ids in their new display order.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<DocumentId>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: String,
}

pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuItem>>>, ApiError> {
    let items = state.items.list().await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(draft): Json<MenuItemDraft>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItem>>), ApiError> {
    let item = state.items.add(draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

/// Returns the item as stored after the merge.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<MenuItemPatch>,
) -> Result<Json<ApiResponse<MenuItem>>, ApiError> {
    state.items.update(&id, patch).await?;
    let item = state.items.find(&id).await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    state.items.delete(&id).await?;
    Ok(Json(ApiResponse::success(DeletedResponse { id })))
}

pub async fn reorder_items(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<ApiResponse<Vec<OrderAssignment>>>, ApiError> {
    let assignments = state.items.reorder(&request.ids).await?;
    Ok(Json(ApiResponse::success(assignments)))
}

pub async fn compact_items(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrderAssignment>>>, ApiError> {
    let assignments = state.items.compact().await?;
    Ok(Json(ApiResponse::success(assignments)))
}
