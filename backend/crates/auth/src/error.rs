//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::IdParseError;
use platform::bearer::BearerError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found
    #[error("user not found")]
    UserNotFound,

    /// Login already registered
    #[error("login already exists")]
    LoginTaken,

    /// Unknown login or wrong password
    #[error("invalid login or password")]
    InvalidCredentials,

    /// Missing or malformed `Authorization` header
    #[error("{0}")]
    MissingToken(#[from] BearerError),

    /// Signature mismatch or malformed token
    #[error("invalid token")]
    InvalidToken,

    /// Token past its expiry
    #[error("token expired")]
    TokenExpired,

    /// Access token presented where a refresh token was expected, or vice versa
    #[error("invalid token type")]
    WrongTokenKind,

    /// Token is no longer in the user's token set
    #[error("token does not exist")]
    TokenRevoked,

    /// Login failed validation
    #[error("{0}")]
    InvalidLogin(String),

    /// Password validation error
    #[error("{0}")]
    PasswordValidation(String),

    /// Body is not the expected JSON
    #[error("invalid input: {0}")]
    InvalidInput(#[from] JsonRejection),

    /// Malformed path id
    #[error("invalid id: {0}")]
    InvalidId(#[from] IdParseError),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Token store error
    #[error("token store error: {0}")]
    TokenStore(#[from] redis::RedisError),

    /// Failure reported by another context while purging user resources
    #[error("{0}")]
    Dependency(#[from] AppError),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::LoginTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::MissingToken(_)
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::WrongTokenKind
            | AuthError::TokenRevoked => ErrorKind::Unauthorized,
            AuthError::InvalidLogin(_)
            | AuthError::PasswordValidation(_)
            | AuthError::InvalidInput(_)
            | AuthError::InvalidId(_) => ErrorKind::BadRequest,
            AuthError::Database(e) => ErrorKind::of_sqlx(e),
            AuthError::TokenStore(e) => {
                if e.is_io_error() || e.is_connection_dropped() || e.is_timeout() {
                    ErrorKind::ServiceUnavailable
                } else {
                    ErrorKind::InternalServerError
                }
            }
            AuthError::Dependency(e) => e.kind(),
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// 5xx errors are rendered with the generic message of their kind.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Dependency(e) => e.masked(),
            other => AppError::new(other.kind(), other.to_string()).masked(),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::TokenStore(e) => {
                tracing::error!(error = %e, "Token store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Dependency(e) if e.is_server_error() => {
                tracing::error!(error = ?e, "User resource cleanup failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenRevoked => {
                tracing::warn!("Revoked token presented");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Token with bad signature or format presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind as JwtErrorKind;

        match err.kind() {
            JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}
