use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::store::StoreError;

// Custom error type untuk rider chat service dengan response standardized
#[derive(Debug)]
pub enum AppError {
    StoreUnavailable(String),
    NotFound(String),
    MalformedRecord(String),
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    InternalServer(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalServer(msg.into())
    }
}

// Konversi dari StoreError ke AppError
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) | StoreError::Timeout | StoreError::Rejected { .. } => {
                tracing::error!("Store error: {}", err);
                AppError::StoreUnavailable(err.to_string())
            }
            StoreError::Malformed(msg) => {
                tracing::warn!("Malformed store record: {}", msg);
                AppError::MalformedRecord(msg)
            }
            StoreError::InvalidPath(path) => {
                AppError::BadRequest(format!("Identifier tidak valid: {}", path))
            }
        }
    }
}

// Implementasi IntoResponse untuk return error sebagai JSON response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::StoreUnavailable(msg) => {
                // Detail hanya di log, client cukup tahu harus coba lagi
                tracing::error!("Store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store_unavailable",
                    "Data sedang tidak bisa diakses, silakan coba lagi".to_string(),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::MalformedRecord(msg) => {
                tracing::error!("Malformed record: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "malformed_record",
                    "Data conversation rusak".to_string(),
                )
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::InternalServer(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_server_error",
                    msg.clone(),
                )
            }
        };

        let body = Json(json!({
            "error": error_type,
            "message": message,
        }));

        (status, body).into_response()
    }
}

// Display trait untuk error formatting
impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::StoreUnavailable(msg) => write!(f, "Store unavailable: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::MalformedRecord(msg) => write!(f, "Malformed record: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::InternalServer(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
