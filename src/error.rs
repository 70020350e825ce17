use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every failure a handler can surface. Bodies are part of the observable
/// contract: the interactive endpoints answer in plain text, the analysis
/// endpoint in JSON.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Username already exists!")]
    DuplicateUsername,

    /// One generic failure for both unknown-username and wrong-password,
    /// so login responses cannot be used to enumerate accounts.
    #[error("Invalid credentials!")]
    InvalidCredentials,

    /// No session on a JSON endpoint.
    #[error("Unauthorized")]
    Unauthorized,

    /// Session present but the role does not allow the resource.
    #[error("Access Denied")]
    Forbidden,

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::DuplicateUsername => {
                (StatusCode::CONFLICT, "Username already exists!").into_response()
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials!").into_response()
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response(),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Access Denied").into_response(),
            AppError::Database(e) => {
                error!(error = %e, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
            AppError::Internal(e) => {
                error!(error = %e, "internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
