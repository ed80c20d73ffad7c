//! Image upload endpoint for the admin item form.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use menu_core::services::{UploadRequest, UploadedObject};

use crate::error::ApiError;
use crate::state::AppState;

/// Reads the `file` field and stores it. Other fields are ignored.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadedObject>, ApiError> {
    info!("File upload request received");

    let mut request: Option<UploadRequest> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read field", e))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read file", e))?;

        request = Some(UploadRequest {
            data,
            content_type,
            file_name,
        });
    }

    let request = request.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    let uploaded = state.uploads.upload(request).await?;
    Ok(Json(uploaded))
}

/// Body limit rejections keep their 413 status.
fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(format!("{}: {}", context, e.body_text()))
    } else {
        ApiError::bad_request(format!("{}: {}", context, e))
    }
}
