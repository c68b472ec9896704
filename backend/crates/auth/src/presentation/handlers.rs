//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticatedUser, ChangePasswordUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    LoginInput, LoginUseCase, LogoutUseCase, RefreshUseCase, RegisterInput, RegisterUseCase,
    TokenCodec,
};
use crate::domain::entity::token::TokenPair;
use crate::domain::repository::{TokenStore, UserRepository, UserResourcePurger};
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthResponse, ChangePasswordRequest, CredentialsRequest, LogoutRequest, MessageResponse,
    RefreshRequest, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<U, T, P>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub tokens: Arc<T>,
    pub purger: Arc<P>,
    pub codec: Arc<TokenCodec>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/register
pub async fn register<U, T, P>(
    State(state): State<AuthAppState<U, T, P>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<AuthResponse>)>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = RegisterUseCase::new(
        state.users.clone(),
        state.tokens.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(RegisterInput {
            login: req.login,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: output.user_id.value(),
            tokens: output.tokens,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<U, T, P>(
    State(state): State<AuthAppState<U, T, P>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<Json<AuthResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = LoginUseCase::new(
        state.users.clone(),
        state.tokens.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            login: req.login,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        id: output.user_id.value(),
        tokens: output.tokens,
    }))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/refresh
pub async fn refresh<U, T, P>(
    State(state): State<AuthAppState<U, T, P>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AuthResult<Json<TokenPair>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = RefreshUseCase::new(state.tokens.clone(), state.codec.clone());
    let pair = use_case.execute(&req.refresh_token).await?;

    Ok(Json(pair))
}

// ============================================================================
// Logout (requires authentication)
// ============================================================================

/// DELETE /api/auth/logout
pub async fn logout<U, T, P>(
    State(state): State<AuthAppState<U, T, P>>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<LogoutRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    LogoutUseCase::new(state.tokens.clone())
        .execute(user.user_id, &req.refresh_token, &user.access_token)
        .await?;

    Ok(Json(MessageResponse::new("successfully logged out")))
}

// ============================================================================
// Users (requires authentication)
// ============================================================================

/// GET /api/auth/user/me
pub async fn me<U, T, P>(
    State(state): State<AuthAppState<U, T, P>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AuthResult<Json<UserResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    let profile = GetUserUseCase::new(state.users.clone())
        .execute(user.user_id)
        .await?;

    Ok(Json(profile.into()))
}

/// GET /api/auth/user/id/{id}
pub async fn get_user<U, T, P>(
    State(state): State<AuthAppState<U, T, P>>,
    Path(raw_id): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    let user_id: UserId = raw_id.parse()?;

    let profile = GetUserUseCase::new(state.users.clone())
        .execute(user_id)
        .await?;

    Ok(Json(profile.into()))
}

/// GET /api/auth/user/all
pub async fn list_users<U, T, P>(
    State(state): State<AuthAppState<U, T, P>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    let users = ListUsersUseCase::new(state.users.clone()).execute().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PATCH /api/auth/user/password
pub async fn change_password<U, T, P>(
    State(state): State<AuthAppState<U, T, P>>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    ChangePasswordUseCase::new(state.users.clone(), state.config.clone())
        .execute(user.user_id, req.password)
        .await?;

    Ok(Json(MessageResponse::new("password updated")))
}

/// DELETE /api/auth/user/delete
pub async fn delete_user<U, T, P>(
    State(state): State<AuthAppState<U, T, P>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AuthResult<Json<MessageResponse>>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
    P: UserResourcePurger + Clone + Send + Sync + 'static,
{
    DeleteUserUseCase::new(
        state.users.clone(),
        state.tokens.clone(),
        state.purger.clone(),
    )
    .execute(user.user_id)
    .await?;

    Ok(Json(MessageResponse::new("user deleted")))
}
