//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use std::time::Duration;

use kernel::error::app_error::AppResult;

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    UserId, login::Login, token_kind::TokenKind, user_password::UserPassword,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user; `AuthError::LoginTaken` if the login is already used
    async fn create(&self, login: &Login, password_hash: &UserPassword) -> AuthResult<User>;

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    async fn find_by_login(&self, login: &Login) -> AuthResult<Option<User>>;

    /// All users ordered by id
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// `AuthError::UserNotFound` if no row was updated
    async fn update_password(&self, user_id: UserId, password_hash: &UserPassword)
    -> AuthResult<()>;

    /// `AuthError::UserNotFound` if no row was deleted
    async fn delete(&self, user_id: UserId) -> AuthResult<()>;
}

/// Per-user, per-kind sets of live tokens
///
/// Membership is what makes a token usable: removing a member revokes the
/// token even though its signature stays valid until expiry.
#[trait_variant::make(TokenStore: Send)]
pub trait LocalTokenStore {
    /// Add a token and reset the set's TTL
    async fn add(&self, user_id: UserId, kind: TokenKind, token: &str, ttl: Duration)
    -> AuthResult<()>;

    async fn contains(&self, user_id: UserId, kind: TokenKind, token: &str) -> AuthResult<bool>;

    /// Swap `old` for `new` atomically and reset the TTL.
    ///
    /// Returns `false` without touching the set when `old` is not a member,
    /// so only one of several concurrent callers presenting the same `old`
    /// token can win.
    async fn replace(
        &self,
        user_id: UserId,
        kind: TokenKind,
        old: &str,
        new: &str,
        ttl: Duration,
    ) -> AuthResult<bool>;

    async fn remove(&self, user_id: UserId, kind: TokenKind, token: &str) -> AuthResult<()>;

    /// Drop both token sets of a user
    async fn remove_all(&self, user_id: UserId) -> AuthResult<()>;
}

/// Data owned by a user in other contexts (cats, photos)
///
/// Called before the user row is deleted; must be safe to call again after
/// a partial failure.
#[trait_variant::make(UserResourcePurger: Send)]
pub trait LocalUserResourcePurger {
    async fn purge_user_resources(&self, user_id: UserId) -> AppResult<()>;
}
