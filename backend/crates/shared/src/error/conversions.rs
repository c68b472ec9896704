//! Error conversions
//!
//! Driver errors classified into [`ErrorKind`], and the HTTP rendering of
//! [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;

#[cfg(feature = "sqlx")]
impl ErrorKind {
    /// Classify a database driver error
    ///
    /// Lost connections and exhausted pools are 503; everything else is 500.
    /// Row-level outcomes (missing rows, unique violations) are mapped by the
    /// repositories before they get here.
    pub fn of_sqlx(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                ErrorKind::ServiceUnavailable
            }
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            // Class 53 (insufficient resources) and 57 (operator intervention)
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some(code) if code.starts_with("53") || code.starts_with("57") => {
                    ErrorKind::ServiceUnavailable
                }
                _ => ErrorKind::InternalServerError,
            },
            _ => ErrorKind::InternalServerError,
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let kind = ErrorKind::of_sqlx(&err);
        AppError::new(kind, kind.public_message()).with_source(err)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({ "error": self.message() });

        (status, Json(body)).into_response()
    }
}
