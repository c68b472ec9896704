//! Login Use Case
//!
//! Authenticates a user by login and password and issues a token pair.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::issue_session::IssueSessionUseCase;
use crate::application::token::TokenCodec;
use crate::domain::entity::token::TokenPair;
use crate::domain::repository::{TokenStore, UserRepository};
use crate::domain::value_object::{UserId, login::Login, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub login: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: UserId,
    pub tokens: TokenPair,
}

/// Login use case
pub struct LoginUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    user_repo: Arc<U>,
    token_store: Arc<T>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U, T> LoginUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    pub fn new(
        user_repo: Arc<U>,
        token_store: Arc<T>,
        codec: Arc<TokenCodec>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            token_store,
            codec,
            config,
        }
    }

    /// Unknown login and wrong password are indistinguishable to the caller.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let login = Login::new(&input.login).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_login(&login)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_valid = user
            .password_hash
            .verify_blocking(raw_password, self.config.password_pepper.clone())
            .await?;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = IssueSessionUseCase::new(self.token_store.clone(), self.codec.clone())
            .execute(user.id)
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginOutput {
            user_id: user.id,
            tokens,
        })
    }
}
