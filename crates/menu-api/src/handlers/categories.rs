//! Admin category management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use menu_core::domain::Category;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedCategory {
    pub id: String,
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state.categories.list().await?;
    Ok(Json(ApiResponse::success(categories)))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), ApiError> {
    let category = state.categories.create(&request.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(category))))
}

pub async fn rename_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    state.categories.rename(&id, &request.name).await?;
    Ok(Json(ApiResponse::success(Category {
        id,
        name: request.name.trim().to_string(),
    })))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedCategory>>, ApiError> {
    state.categories.delete(&id).await?;
    Ok(Json(ApiResponse::success(DeletedCategory { id })))
}
