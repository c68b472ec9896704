//! Delete User Use Case
//!
//! Removes a user together with everything the user owns.
//!
//! ## Order
//! 1. cats and photos in other contexts (blobs, then rows)
//! 2. both token sets
//! 3. the user row
//!
//! Each step is idempotent and the sequence stops at the first failure,
//! so repeating the request after a partial failure converges. The user
//! row goes last: while it exists the client can still authenticate and
//! retry.

use std::sync::Arc;

use crate::domain::repository::{TokenStore, UserRepository, UserResourcePurger};
use crate::domain::value_object::UserId;
use crate::error::AuthResult;

pub struct DeleteUserUseCase<U, T, P>
where
    U: UserRepository,
    T: TokenStore,
    P: UserResourcePurger,
{
    user_repo: Arc<U>,
    token_store: Arc<T>,
    purger: Arc<P>,
}

impl<U, T, P> DeleteUserUseCase<U, T, P>
where
    U: UserRepository,
    T: TokenStore,
    P: UserResourcePurger,
{
    pub fn new(user_repo: Arc<U>, token_store: Arc<T>, purger: Arc<P>) -> Self {
        Self {
            user_repo,
            token_store,
            purger,
        }
    }

    pub async fn execute(&self, user_id: UserId) -> AuthResult<()> {
        self.purger.purge_user_resources(user_id).await?;
        self.token_store.remove_all(user_id).await?;
        self.user_repo.delete(user_id).await?;

        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
