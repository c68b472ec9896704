//! Issue Session Use Case
//!
//! Mints a token pair for an authenticated user and records it in the
//! token store.

use std::sync::Arc;

use crate::application::token::TokenCodec;
use crate::domain::entity::token::TokenPair;
use crate::domain::repository::TokenStore;
use crate::domain::value_object::{UserId, token_kind::TokenKind};
use crate::error::AuthResult;

pub struct IssueSessionUseCase<T>
where
    T: TokenStore,
{
    token_store: Arc<T>,
    codec: Arc<TokenCodec>,
}

impl<T> IssueSessionUseCase<T>
where
    T: TokenStore,
{
    pub fn new(token_store: Arc<T>, codec: Arc<TokenCodec>) -> Self {
        Self { token_store, codec }
    }

    /// Store writes are best-effort here: a failure is logged and the pair
    /// is still returned. A refresh token that was not stored will be
    /// rejected on first use and the client has to log in again.
    pub async fn execute(&self, user_id: UserId) -> AuthResult<TokenPair> {
        let pair = self.codec.issue_pair(user_id)?;
        let config = self.codec.config();

        if let Err(e) = self
            .token_store
            .add(
                user_id,
                TokenKind::Refresh,
                &pair.refresh_token,
                config.refresh_token_ttl,
            )
            .await
        {
            tracing::warn!(
                user_id = %user_id,
                error = %e,
                "Failed to persist refresh token, continuing anyway"
            );
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

        Ok(pair)
    }
}
