//! Error Kind
//!
//! The status classes every context maps its errors onto.

use serde::Serialize;

/// エラー種別
///
/// `auth` と `cats` の各エラー列挙体はこの分類を経由して
/// HTTP ステータスへ変換されます。
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Forbidden.status_code(), 403);
/// assert!(ErrorKind::ServiceUnavailable.is_server_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed body, form or path parameter; failed field validation
    BadRequest,
    /// Missing, malformed, expired or revoked token; wrong password
    Unauthorized,
    /// Authenticated but not the owner of the cat or photo
    Forbidden,
    NotFound,
    /// Request deadline exceeded
    RequestTimeout,
    /// Login already taken
    Conflict,
    PayloadTooLarge,
    InternalServerError,
    /// Postgres, Redis or the object store could not be reached
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::RequestTimeout => 408,
            ErrorKind::Conflict => 409,
            ErrorKind::PayloadTooLarge => 413,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// 5xx 系はクライアントに詳細を返さず、ログにのみ記録する
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Message shown to clients in place of a server-side error
    pub const fn public_message(&self) -> &'static str {
        match self {
            ErrorKind::ServiceUnavailable => "service unavailable",
            _ => "internal server error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::RequestTimeout => "Request Timeout",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::PayloadTooLarge => "Payload Too Large",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        };
        f.write_str(reason)
    }
}
