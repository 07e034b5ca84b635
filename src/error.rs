use serde::Serialize;
use thiserror::Error;

/// One validation problem scoped to a form field, so the UI can render
/// several at once instead of stopping at the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    Fields(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;
        use axum::Json;
        use serde_json::json;

        let (status, body) = match &self {
            AppError::Unauthorized(_) => (StatusCode::FORBIDDEN, json!({ "error": self.to_string() })),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() })),
            AppError::Fields(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string(), "fields": fields }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
