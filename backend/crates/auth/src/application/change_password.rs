//! Change Password Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::AuthResult;

pub struct ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ChangePasswordUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Existing tokens stay valid; only the stored hash changes.
    pub async fn execute(&self, user_id: UserId, new_password: String) -> AuthResult<()> {
        let raw_password = RawPassword::new(new_password)?;
        let password_hash =
            UserPassword::hash_blocking(raw_password, self.config.password_pepper.clone()).await?;

        self.user_repo
            .update_password(user_id, &password_hash)
            .await?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
