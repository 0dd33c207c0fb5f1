//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use site_core::{DocumentError, StoreError};
use site_export::ExportError;
use thiserror::Error;

/// Errors returned by API handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unknown project.
    #[error("Project not found: {0}")]
    NotFound(String),

    /// Malformed request body.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Document store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Export failure.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_)
            | Self::Store(
                StoreError::ProjectNotFound(_)
                | StoreError::Document(DocumentError::PageNotFound(_)),
            )
            | Self::Export(ExportError::UnknownTarget(_)) => StatusCode::NOT_FOUND,
            Self::BadRequest(_)
            | Self::Store(StoreError::Document(_) | StoreError::InvalidProjectId(_))
            | Self::Export(ExportError::NoPages) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::NoDataDir) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Store(StoreError::Document(DocumentError::LastPage)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Store(StoreError::Document(DocumentError::InvalidImport(
                "bad".into()
            )))
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Store(StoreError::InvalidProjectId("my project".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Store(StoreError::NoDataDir).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Export(ExportError::UnknownTarget("pdf".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Store(StoreError::Serialization("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_serialization() {
        let body = ErrorBody {
            error: "Cannot delete the last page".into(),
        };
        let json = serde_json::to_string(&body).expect("should serialize");
        assert_eq!(json, r#"{"error":"Cannot delete the last page"}"#);
    }
}
