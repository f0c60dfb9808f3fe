use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::processor::ProcessError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing or malformed caller identity")]
    MissingIdentity,
    #[error("vehicle not found or unauthorized")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl From<ProcessError> for ApiError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Unauthorized => Self::Unauthorized,
            ProcessError::Database(e) => Self::Database(e),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingIdentity => StatusCode::UNAUTHORIZED,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // storage details stay in the logs, not in the response body
        let message = match &self {
            Self::Database(e) => {
                tracing::error!("storage error: {e}");
                "Server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { success: false, message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::MissingIdentity.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::PoolClosed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unauthorized_maps_from_process_error() {
        let err: ApiError = ProcessError::Unauthorized.into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }
}
