//! Logout Use Case
//!
//! Revokes one refresh token of the calling user.

use std::sync::Arc;

use crate::domain::repository::TokenStore;
use crate::domain::value_object::{UserId, token_kind::TokenKind};
use crate::error::AuthResult;

pub struct LogoutUseCase<T>
where
    T: TokenStore,
{
    token_store: Arc<T>,
}

impl<T> LogoutUseCase<T>
where
    T: TokenStore,
{
    pub fn new(token_store: Arc<T>) -> Self {
        Self { token_store }
    }

    /// Only the caller's own set is touched, so a token belonging to
    /// someone else is a no-op. `access_token` is the credential the
    /// request was authenticated with and is revoked as well.
    pub async fn execute(
        &self,
        user_id: UserId,
        refresh_token: &str,
        access_token: &str,
    ) -> AuthResult<()> {
        self.token_store
            .remove(user_id, TokenKind::Refresh, refresh_token)
            .await?;
        self.token_store
            .remove(user_id, TokenKind::Access, access_token)
            .await?;

        tracing::info!(user_id = %user_id, "User logged out");
        Ok(())
    }
}
