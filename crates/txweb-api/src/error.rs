//! Error types for txweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use txweb_core::{CoreError, ErrorDetails, ErrorSeverity};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Service unavailable: {}", .0.message)]
    ServiceUnavailable(ErrorDetails),

    #[error("Internal server error: {}", .0.message)]
    InternalError(ErrorDetails),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ApiError::NotFound { .. } => ErrorSeverity::Info,
            ApiError::ServiceUnavailable(details) | ApiError::InternalError(details) => {
                details.code.severity()
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::TransactionNotFound { id } => ApiError::NotFound {
                resource: format!("transaction {}", id),
            },
            CoreError::StoreUnavailable => ApiError::ServiceUnavailable(error.to_details()),
            CoreError::IdSpaceExhausted { .. } => ApiError::InternalError(error.to_details()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let level = self.severity().log_level();
        match self {
            // 404 carries no body
            ApiError::NotFound { resource } => {
                log::log!(level, "{} not found", resource);
                status.into_response()
            }
            ApiError::ServiceUnavailable(details) | ApiError::InternalError(details) => {
                log::log!(
                    level,
                    "{} ({}) -> {}",
                    details,
                    details.code.severity(),
                    status
                );
                (status, Json(details)).into_response()
            }
        }
    }
}
