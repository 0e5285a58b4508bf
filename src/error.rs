use axum::{
    extract::rejection::{BytesRejection, FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::store::StoreError;

/// Errors raised by request handlers, rendered as JSON failure bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to save locations")]
    SaveFailed(#[source] StoreError),

    #[error("Failed to clear locations")]
    ClearFailed(#[source] StoreError),

    #[error("Invalid JSON body")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Invalid form body")]
    InvalidForm(#[from] FormRejection),

    #[error("Could not read request body")]
    UnreadableBody(#[from] BytesRejection),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::SaveFailed(_) | AppError::ClearFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidForm(e) => e.status(),
            AppError::UnreadableBody(e) => e.status(),
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::SaveFailed(e) | AppError::ClearFailed(e) => e.to_string(),
            AppError::InvalidBody(e) => e.to_string(),
            AppError::InvalidForm(e) => e.body_text(),
            AppError::UnreadableBody(e) => e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self.detail(), "{}", self);
        } else {
            tracing::debug!(error = %self.detail(), "{}", self);
        }

        let body = json!({
            "success": false,
            "message": self.to_string(),
            "error": self.detail(),
        });

        (status, Json(body)).into_response()
    }
}
