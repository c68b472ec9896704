//! Application Error
//!
//! [`AppError`] is what every context renders at the HTTP boundary and what
//! crosses crate borders (for example the cat purge run by account deletion).

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// `kind` がステータスを決め、`message` は `{"error": message}` として
/// そのままクライアントへ返されます。`source` はログ専用です。
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "cat not found");
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.message(), "cat not found");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// リクエスト期限超過
    pub fn request_timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::RequestTimeout, message)
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn payload_too_large(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::PayloadTooLarge, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Replace the message of a 5xx error with the kind's public message
    ///
    /// Client errors pass through untouched. The original message is kept as
    /// the source so it still shows up in logs.
    pub fn masked(self) -> Self {
        if !self.kind.is_server_error() {
            return self;
        }
        let detail = MaskedDetail(self.message.into_owned(), self.source);
        Self {
            kind: self.kind,
            message: Cow::Borrowed(self.kind.public_message()),
            source: Some(Box::new(detail)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

/// Message hidden by [`AppError::masked`]
struct MaskedDetail(String, Option<Box<dyn Error + Send + Sync + 'static>>);

impl fmt::Debug for MaskedDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.1 {
            Some(source) => write!(f, "{}: {:?}", self.0, source),
            None => f.write_str(&self.0),
        }
    }
}

impl fmt::Display for MaskedDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for MaskedDetail {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.1.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_map_to_kind() {
        assert_eq!(AppError::bad_request("age must be an integer").status_code(), 400);
        assert_eq!(AppError::unauthorized("token expired").status_code(), 401);
        assert_eq!(AppError::forbidden("not enough right").status_code(), 403);
        assert_eq!(AppError::not_found("cat not found").status_code(), 404);
        assert_eq!(AppError::request_timeout("deadline").status_code(), 408);
        assert_eq!(AppError::conflict("login taken").status_code(), 409);
        assert_eq!(AppError::payload_too_large("file").status_code(), 413);
        assert_eq!(AppError::internal("boom").status_code(), 500);
        assert_eq!(AppError::service_unavailable("redis").status_code(), 503);
    }

    #[test]
    fn test_masked_hides_server_detail() {
        let err = AppError::internal("failed to connect to 10.0.0.3:5432").masked();
        assert_eq!(err.message(), "internal server error");
        assert_eq!(
            err.source().map(|s| s.to_string()).as_deref(),
            Some("failed to connect to 10.0.0.3:5432")
        );

        let err = AppError::service_unavailable("redis down").masked();
        assert_eq!(err.message(), "service unavailable");
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn test_masked_keeps_client_message() {
        let err = AppError::not_found("photo not found").masked();
        assert_eq!(err.message(), "photo not found");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_display() {
        let err = AppError::forbidden("not enough right for this operation");
        assert_eq!(
            err.to_string(),
            "[Forbidden] not enough right for this operation"
        );
    }
}
