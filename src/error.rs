use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid JSON: {}", rejection.body_text()))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                e.to_string()
            }
            AppError::Validation(msg) => {
                tracing::warn!("Validation error: {}", msg);
                msg
            }
            // Logged at warn by the auth middleware, which knows the route.
            AppError::Unauthorized(msg) => msg,
            AppError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                msg
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                format!("{:#}", e)
            }
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}
