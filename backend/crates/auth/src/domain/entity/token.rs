//! Token Entities

use serde::{Deserialize, Serialize};

use crate::domain::value_object::{UserId, token_kind::TokenKind};

/// Signed claims carried by both access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Expiry, seconds since the Unix epoch
    pub exp: u64,
    /// Random UUID v4, unique per issued token
    pub jti: String,
}

/// Access/refresh pair handed to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
