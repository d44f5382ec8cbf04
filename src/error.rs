use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A mutation whose transaction was rolled back. Carries the message shown to the user.
    #[error("Persistence failure: {0}")]
    Persistence(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Swaps a storage failure for the message the user should see.
    /// Not-found and validation errors pass through untouched.
    pub fn into_persistence(self, message: impl Into<String>) -> Self {
        match self {
            Self::Database(e) => {
                tracing::error!("Mutation rolled back: {}", e);
                Self::Persistence(message.into())
            }
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Database error occurred" }),
                )
            }
            Self::NotFound(ref msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            Self::Validation(ref errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "Validation failed",
                    "fields": errors,
                }),
            ),
            Self::Persistence(ref msg) => {
                tracing::error!("Persistence failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            Self::Other(ref e) => {
                tracing::error!("Unexpected error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An unexpected error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
