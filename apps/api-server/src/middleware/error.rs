//! Error handling - every failure becomes `{"error": ..., "status": ...}`.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error, http::StatusCode, web};
use recyclehub_core::DomainError;
use recyclehub_shared::ErrorResponse;
use thiserror::Error;

/// Application-level error type rendered as a JSON error body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code().as_u16();
        let error = match self {
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => ErrorResponse::new(status, msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::Validation(_) | DomainError::Conflict(_) | DomainError::FileType(_) => {
                AppError::BadRequest(message)
            }
            DomainError::InvalidCredentials | DomainError::Unauthorized => {
                AppError::Unauthorized(message)
            }
            DomainError::Forbidden => AppError::Forbidden(message),
            DomainError::NotFound { .. } | DomainError::UserNotFound(_) => {
                AppError::NotFound(message)
            }
            DomainError::Internal(detail) => AppError::Internal(detail),
        }
    }
}

/// JSON extractor config whose failures keep the JSON error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        tracing::debug!(error = %err, "Rejected JSON body");
        error::Error::from(AppError::BadRequest(format!("Invalid JSON body: {err}")))
    })
}

/// Query extractor config whose failures keep the JSON error shape.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        error::Error::from(AppError::BadRequest(format!("Invalid query string: {err}")))
    })
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
