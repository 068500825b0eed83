use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Request-level failure taxonomy.
///
/// `Validation` and `Conflict` both map to 400: the client sent something
/// the store cannot accept. `Database` hides its detail from clients unless
/// the debug flag was enabled at startup; the detail is always logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {detail}")]
    Database { detail: String, expose: bool },
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(err: impl std::fmt::Display, expose: bool) -> Self {
        Self::Database {
            detail: err.to_string(),
            expose,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(self) -> String {
        match self {
            Self::Validation(msg) | Self::Conflict(msg) | Self::NotFound(msg) => msg,
            Self::Database { detail, expose } => {
                error!(error = %detail, "store failure");
                if expose {
                    detail
                } else {
                    "Internal server error".to_string()
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_detail_is_masked_by_default() {
        let err = ApiError::database("connection refused", false);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail(), "Internal server error");
    }

    #[test]
    fn database_detail_is_exposed_in_debug() {
        let err = ApiError::database("connection refused", true);
        assert_eq!(err.detail(), "connection refused");
    }

    #[test]
    fn conflict_maps_to_bad_request() {
        assert_eq!(
            ApiError::conflict("Email already exists").status(),
            StatusCode::BAD_REQUEST
        );
    }
}
