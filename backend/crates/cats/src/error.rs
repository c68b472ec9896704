//! Cats Error Types
//!
//! Cat and photo error variants, rendered through `kernel::error::AppError`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::IdParseError;
use thiserror::Error;

/// Cats-specific result type alias
pub type CatsResult<T> = Result<T, CatsError>;

/// Cats-specific error variants
#[derive(Debug, Error)]
pub enum CatsError {
    #[error("cat not found")]
    CatNotFound,

    #[error("photo not found")]
    PhotoNotFound,

    /// Caller did not create the cat
    #[error("not enough right for this operation")]
    NotOwner,

    /// Photo id points at another cat's photo
    #[error("photo does not belong to this cat")]
    PhotoNotOwned,

    /// Field validation (name, age, description)
    #[error("{0}")]
    Validation(String),

    /// Malformed multipart form or file batch
    #[error("{0}")]
    InvalidForm(String),

    /// Body is not the expected JSON
    #[error("invalid input: {0}")]
    InvalidInput(#[from] JsonRejection),

    /// Malformed path id
    #[error("invalid id: {0}")]
    InvalidId(#[from] IdParseError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("object storage error: {0}")]
    Storage(#[from] object_store::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CatsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatsError::CatNotFound | CatsError::PhotoNotFound => ErrorKind::NotFound,
            CatsError::NotOwner | CatsError::PhotoNotOwned => ErrorKind::Forbidden,
            CatsError::Validation(_)
            | CatsError::InvalidForm(_)
            | CatsError::InvalidInput(_)
            | CatsError::InvalidId(_) => ErrorKind::BadRequest,
            CatsError::Database(e) => ErrorKind::of_sqlx(e),
            CatsError::Storage(_) | CatsError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            other => AppError::new(other.kind(), other.to_string()).masked(),
        }
    }

    fn log(&self) {
        match self {
            CatsError::Database(e) => {
                tracing::error!(error = %e, "Cats database error");
            }
            CatsError::Storage(e) => {
                tracing::error!(error = %e, "Photo storage error");
            }
            CatsError::Internal(msg) => {
                tracing::error!(message = %msg, "Cats internal error");
            }
            CatsError::NotOwner | CatsError::PhotoNotOwned => {
                tracing::warn!(error = %self, "Ownership check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Cats error");
            }
        }
    }
}

impl IntoResponse for CatsError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
