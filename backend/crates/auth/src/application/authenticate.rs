//! Authenticate Use Case
//!
//! Resolves a bearer access token to the calling user.

use std::sync::Arc;

use crate::application::token::TokenCodec;
use crate::domain::repository::TokenStore;
use crate::domain::value_object::{UserId, token_kind::TokenKind};
use crate::error::{AuthError, AuthResult};

/// Principal injected into request extensions by the auth middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    /// The bearer token the request was authenticated with
    pub access_token: String,
}

pub struct AuthenticateUseCase<T>
where
    T: TokenStore,
{
    token_store: Arc<T>,
    codec: Arc<TokenCodec>,
}

impl<T> AuthenticateUseCase<T>
where
    T: TokenStore,
{
    pub fn new(token_store: Arc<T>, codec: Arc<TokenCodec>) -> Self {
        Self { token_store, codec }
    }

    pub async fn execute(&self, access_token: &str) -> AuthResult<AuthenticatedUser> {
        let claims = self.codec.parse_kind(access_token, TokenKind::Access)?;

        if self.codec.config().track_access_tokens
            && !self
                .token_store
                .contains(claims.user_id, TokenKind::Access, access_token)
                .await?
        {
            return Err(AuthError::TokenRevoked);
        }

        Ok(AuthenticatedUser {
            user_id: claims.user_id,
            access_token: access_token.to_string(),
        })
    }
}
