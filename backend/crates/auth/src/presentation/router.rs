//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
};
use platform::deadline::{Deadline, enforce_deadline};
use std::sync::Arc;

use crate::application::{TokenCodec, config::AuthConfig};
use crate::domain::repository::{TokenStore, UserRepository, UserResourcePurger};
use crate::infra::{postgres::PgUserRepository, token_store::RedisTokenStore};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_access_token};

/// Create the Auth router with the PostgreSQL repository and Redis token store
///
/// Routes are relative; the caller nests them under `/api`.
pub fn auth_router<P>(
    repo: PgUserRepository,
    tokens: RedisTokenStore,
    purger: P,
    config: AuthConfig,
) -> Router
where
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    auth_router_generic(repo, tokens, purger, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<U, T, P>(repo: U, tokens: T, purger: P, config: AuthConfig) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    let codec = Arc::new(TokenCodec::new(&config));
    let deadline = Deadline(config.request_timeout);

    let state = AuthAppState {
        users: Arc::new(repo),
        tokens: Arc::new(tokens),
        purger: Arc::new(purger),
        codec: codec.clone(),
        config: Arc::new(config),
    };

    let guard = AuthMiddlewareState::new(state.tokens.clone(), codec);

    let protected = Router::new()
        .route("/auth/logout", delete(handlers::logout::<U, T, P>))
        .route("/auth/user/me", get(handlers::me::<U, T, P>))
        .route("/auth/user/id/{id}", get(handlers::get_user::<U, T, P>))
        .route("/auth/user/all", get(handlers::list_users::<U, T, P>))
        .route(
            "/auth/user/password",
            patch(handlers::change_password::<U, T, P>),
        )
        .route("/auth/user/delete", delete(handlers::delete_user::<U, T, P>))
        .route_layer(from_fn_with_state(guard, require_access_token::<T>));

    Router::new()
        .route("/register", post(handlers::register::<U, T, P>))
        .route("/login", post(handlers::login::<U, T, P>))
        .route("/refresh", post(handlers::refresh::<U, T, P>))
        .merge(protected)
        .layer(from_fn_with_state(deadline, enforce_deadline))
        .with_state(state)
}
