//! Bearer credential extraction
//!
//! Reads `Authorization: Bearer <token>` from request headers.

use axum::http::{HeaderMap, header};

/// Error when extracting a bearer credential
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Authorization header required")]
    MissingHeader,
    #[error("Invalid authorization header format")]
    InvalidFormat,
}

/// Extract the bearer token from request headers
///
/// The scheme is matched case-insensitively; an empty token counts as a
/// malformed header.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?
        .to_str()
        .map_err(|_| BearerError::InvalidFormat)?;

    let (scheme, token) = value.split_once(' ').ok_or(BearerError::InvalidFormat)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::InvalidFormat);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(BearerError::InvalidFormat);
    }
    Ok(token)
}
