//! Error types for the Slicely server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::extract::ExtractionError;
use crate::rules::RuleError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rule error: {0}")]
    Rules(#[from] RuleError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Rules(e) => {
                if e.is_configuration() {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "configuration_error",
                        e.to_string(),
                    )
                } else {
                    (StatusCode::BAD_REQUEST, "validation_error", e.to_string())
                }
            }
            AppError::Extraction(e) => match e {
                ExtractionError::DocumentNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "not_found",
                    format!("Document not found: {}", id),
                ),
                ExtractionError::Rules(rule_err) => {
                    if rule_err.is_configuration() {
                        (
                            StatusCode::UNPROCESSABLE_ENTITY,
                            "configuration_error",
                            rule_err.to_string(),
                        )
                    } else {
                        (
                            StatusCode::BAD_REQUEST,
                            "validation_error",
                            rule_err.to_string(),
                        )
                    }
                }
                _ => {
                    tracing::error!("Extraction error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "extraction_error",
                        "Extraction failed".to_string(),
                    )
                }
            },
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
