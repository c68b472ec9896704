//! Token Kind Value Object

use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the pair a token is; carried in the `type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "access_token")]
    Access,
    #[serde(rename = "refresh_token")]
    Refresh,
}

impl TokenKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access_token",
            TokenKind::Refresh => "refresh_token",
        }
    }

    /// Cache key of the set holding a user's live tokens of this kind
    pub fn store_key(&self, user_id: UserId) -> String {
        format!("user:{}:{}s", user_id, self.as_str())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
