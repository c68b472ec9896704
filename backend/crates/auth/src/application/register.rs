//! Register Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::issue_session::IssueSessionUseCase;
use crate::application::token::TokenCodec;
use crate::domain::entity::token::TokenPair;
use crate::domain::repository::{TokenStore, UserRepository};
use crate::domain::value_object::{
    UserId,
    login::Login,
    user_password::{RawPassword, UserPassword},
};
use crate::error::AuthResult;

/// Register input
pub struct RegisterInput {
    pub login: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: UserId,
    pub tokens: TokenPair,
}

/// Register use case
pub struct RegisterUseCase<U, T>
where
    U: UserRepository,
    T: TokenStore,
{
    user_repo: Arc<U>,
    token_store: Arc<T>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U, T> RegisterUseCase<U, T>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let login = Login::new(&input.login)?;

        // Length rule is enforced before hashing or touching the database
        let raw_password = RawPassword::new(input.password)?;
        let password_hash =
            UserPassword::hash_blocking(raw_password, self.config.password_pepper.clone()).await?;

        // Uniqueness is enforced by the users.login constraint
        let user = self.user_repo.create(&login, &password_hash).await?;

        tracing::info!(user_id = %user.id, login = %user.login, "User registered");

        let tokens = IssueSessionUseCase::new(self.token_store.clone(), self.codec.clone())
            .execute(user.id)
            .await?;

        Ok(RegisterOutput {
            user_id: user.id,
            tokens,
        })
    }
}
