//! Server-specific error types

use crate::api::response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use genview_ingest::IngestError;
use thiserror::Error;

/// Result type alias for handlers
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Genview error: {0}")]
    Genview(#[from] genview_common::GenviewError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) | AppError::Io(_) | AppError::Genview(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Stable machine-readable code for the JSON body
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unprocessable(_) => "PARSE_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) | AppError::Io(_) | AppError::Genview(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::FileNotFound(_) => AppError::NotFound(err.to_string()),
            IngestError::Parse { .. } | IngestError::Csv(_) => {
                AppError::Unprocessable(err.to_string())
            },
            IngestError::Io(e) => AppError::Io(e),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("background task failed: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                "An IO error occurred".to_string()
            },
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                message.clone()
            },
            AppError::Genview(e) => {
                tracing::error!("Genview error: {:?}", e);
                e.to_string()
            },
            other => {
                tracing::debug!(status = %status, "{}", other);
                other.to_string()
            },
        };

        (status, Json(ErrorResponse::new(self.code(), message))).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_ingest_errors_map_to_status() {
        let missing: AppError = IngestError::FileNotFound(PathBuf::from("sorted_file.tsv")).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "The file 'sorted_file.tsv' was not found.");

        let parse: AppError = IngestError::parse("run_tres.predict", 3, "bad start").into();
        assert_eq!(parse.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(parse.code(), "PARSE_ERROR");

        let io: AppError = IngestError::Io(std::io::Error::other("disk")).into();
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::NotFound("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
