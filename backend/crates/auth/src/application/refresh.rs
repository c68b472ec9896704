//! Refresh Use Case
//!
//! Rotate-on-use: every successful call returns a fresh pair and the
//! presented refresh token stops working immediately.

use std::sync::Arc;

use crate::application::token::TokenCodec;
use crate::domain::entity::token::TokenPair;
use crate::domain::repository::TokenStore;
use crate::domain::value_object::token_kind::TokenKind;
use crate::error::{AuthError, AuthResult};

pub struct RefreshUseCase<T>
where
    T: TokenStore,
{
    token_store: Arc<T>,
    codec: Arc<TokenCodec>,
}

impl<T> RefreshUseCase<T>
where
    T: TokenStore,
{
    pub fn new(token_store: Arc<T>, codec: Arc<TokenCodec>) -> Self {
        Self { token_store, codec }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let claims = self.codec.parse_kind(refresh_token, TokenKind::Refresh)?;
        let user_id = claims.user_id;

        if !self
            .token_store
            .contains(user_id, TokenKind::Refresh, refresh_token)
            .await?
        {
            return Err(AuthError::TokenRevoked);
        }

        let pair = self.codec.issue_pair(user_id)?;
        let config = self.codec.config();

        // Loses to a concurrent refresh of the same token
        let swapped = self
            .token_store
            .replace(
                user_id,
                TokenKind::Refresh,
                refresh_token,
                &pair.refresh_token,
                config.refresh_token_ttl,
            )
            .await?;

        if !swapped {
            tracing::warn!(user_id = %user_id, "Refresh token already rotated");
            return Err(AuthError::TokenRevoked);
        }

        if config.track_access_tokens {
            if let Err(e) = self
                .token_store
                .add(
                    user_id,
                    TokenKind::Access,
                    &pair.access_token,
                    config.access_token_ttl,
                )
                .await
            {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Failed to persist access token, continuing anyway"
                );
            }
        }

        tracing::debug!(user_id = %user_id, "Token pair rotated");

        Ok(pair)
    }
}
