//! Auth Middleware
//!
//! Middleware for requiring a bearer access token on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer;
use std::sync::Arc;

use crate::application::{AuthenticateUseCase, TokenCodec};
use crate::domain::repository::TokenStore;
use crate::error::AuthError;

/// Middleware state
///
/// Also handed to other contexts (cats) so their routes sit behind
/// the same token check.
#[derive(Clone)]
pub struct AuthMiddlewareState<T>
where
    T: TokenStore + Clone + Send + Sync + 'static,
{
    pub tokens: Arc<T>,
    pub codec: Arc<TokenCodec>,
}

impl<T> AuthMiddlewareState<T>
where
    T: TokenStore + Clone + Send + Sync + 'static,
{
    pub fn new(tokens: Arc<T>, codec: Arc<TokenCodec>) -> Self {
        Self { tokens, codec }
    }
}

/// Middleware that requires a valid access token
///
/// On success the request carries an [`AuthenticatedUser`](crate::application::AuthenticatedUser)
/// extension. Use with `from_fn_with_state(state, require_access_token::<T>)`.
pub async fn require_access_token<T>(
    State(state): State<AuthMiddlewareState<T>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    T: TokenStore + Clone + Send + Sync + 'static,
{
    let token = extract_bearer(req.headers())?.to_string();

    let use_case = AuthenticateUseCase::new(state.tokens.clone(), state.codec.clone());
    let user = use_case.execute(&token).await?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
