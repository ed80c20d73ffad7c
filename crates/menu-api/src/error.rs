use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use menu_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String, fields: Vec<String> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Store error: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            fields: Vec::new(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { fields, message } => ApiError::BadRequest { message, fields },
            DomainError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DomainError::Transport(msg) => ApiError::StoreUnavailable(msg),
            DomainError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            ApiError::BadRequest { message, fields } => {
                tracing::warn!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, fields)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg, Vec::new())
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!("Payload too large: {}", msg);
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg, Vec::new())
            }
            ApiError::StoreUnavailable(msg) => {
                tracing::error!("Store error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", msg, Vec::new())
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg, Vec::new())
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code,
            fields,
        });

        (status, body).into_response()
    }
}
