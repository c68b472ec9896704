//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and token store implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - User registration and login with login + password
//! - Stateless JWT access tokens (short-lived) and refresh tokens (long-lived)
//! - Per-user token sets in Redis; a token is usable only while it is a member
//! - Refresh token rotation, logout, password change, account deletion
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on a blocking thread
//! - Refresh rotation is a single atomic swap, so a refresh token works once
//! - Deleting a user first purges resources owned in other contexts

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{AuthenticatedUser, TokenCodec};
pub use domain::repository::{TokenStore, UserRepository, UserResourcePurger};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use infra::token_store::RedisTokenStore;
pub use presentation::middleware::{AuthMiddlewareState, require_access_token};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
