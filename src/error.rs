//! Error types for the equipment ledger server

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// PostgreSQL SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Turn a unique-constraint violation into a `Conflict` carrying `message`.
    /// Any other error is returned unchanged.
    pub fn on_unique_violation(self, message: &str) -> Self {
        if self.has_sqlstate(UNIQUE_VIOLATION) {
            AppError::Conflict(message.to_string())
        } else {
            self
        }
    }

    /// Turn a foreign-key violation into a `Validation` error carrying `message`.
    pub fn on_foreign_key_violation(self, message: &str) -> Self {
        if self.has_sqlstate(FOREIGN_KEY_VIOLATION) {
            AppError::Validation(message.to_string())
        } else {
            self
        }
    }

    fn has_sqlstate(&self, code: &str) -> bool {
        match self {
            AppError::Database(sqlx::Error::Database(db)) => db.code().as_deref() == Some(code),
            _ => false,
        }
    }
}

/// Failure envelope: `{ "success": false, "error": "..." }`
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Database(e) = &self {
            tracing::error!("Database error: {:?}", e);
        }

        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
