//! Cats Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
};
use platform::deadline::{Deadline, enforce_deadline};
use std::sync::Arc;

use auth::{AuthMiddlewareState, TokenStore, require_access_token};

use crate::application::config::CatsConfig;
use crate::domain::repository::{CatPhotoRepository, CatRepository, PhotoStorage};
use crate::infra::{object_storage::ObjectStorePhotoStorage, postgres::PgCatRepository};
use crate::presentation::handlers::{self, CatsAppState};
use crate::presentation::middleware::require_cat_owner;

/// Create the Cats router with the PostgreSQL repository and object storage
///
/// Routes are relative; the caller nests them under `/api/auth/cat`.
pub fn cats_router<T>(
    repo: PgCatRepository,
    storage: ObjectStorePhotoStorage,
    auth: AuthMiddlewareState<T>,
    config: CatsConfig,
) -> Router
where
    T: TokenStore + Clone + Send + Sync + 'static,
{
    cats_router_generic(repo.clone(), repo, storage, auth, config)
}

/// Create a generic Cats router for any repository implementation
pub fn cats_router_generic<C, P, S, T>(
    cats: C,
    photos: P,
    storage: S,
    auth: AuthMiddlewareState<T>,
    config: CatsConfig,
) -> Router
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
    T: TokenStore + Clone + Send + Sync + 'static,
{
    let crud_deadline = from_fn_with_state(Deadline(config.request_timeout), enforce_deadline);
    let upload_deadline = from_fn_with_state(Deadline(config.upload_timeout), enforce_deadline);
    let body_limit = DefaultBodyLimit::max(config.upload_body_limit());

    let state = CatsAppState {
        cats: Arc::new(cats),
        photos: Arc::new(photos),
        storage: Arc::new(storage),
        config: Arc::new(config),
    };

    let authenticated = from_fn_with_state(auth, require_access_token::<T>);
    let owner = from_fn_with_state(state.clone(), require_cat_owner::<C, P, S>);

    // Layers run bottom-up: deadline, then token, then ownership
    let reads = Router::new()
        .route("/all", get(handlers::list_cats::<C, P, S>))
        .route("/id/{id}", get(handlers::get_cat::<C, P, S>))
        .route("/photo/{photo_id}", get(handlers::get_photo::<C, P, S>))
        .route_layer(authenticated.clone())
        .route_layer(crud_deadline.clone());

    let create = Router::new()
        .route("/create", post(handlers::create_cat::<C, P, S>))
        .route_layer(authenticated.clone())
        .route_layer(upload_deadline.clone())
        .layer(body_limit);

    let owned = Router::new()
        .route(
            "/mw/{id}",
            put(handlers::update_cat::<C, P, S>).delete(handlers::delete_cat::<C, P, S>),
        )
        .route("/mw/{id}/name", patch(handlers::update_name::<C, P, S>))
        .route("/mw/{id}/age", patch(handlers::update_age::<C, P, S>))
        .route(
            "/mw/{id}/description",
            patch(handlers::update_description::<C, P, S>),
        )
        .route(
            "/mw/{id}/photo/{photo_id}/primary",
            patch(handlers::set_primary_photo::<C, P, S>),
        )
        .route(
            "/mw/{id}/photo/{photo_id}",
            delete(handlers::delete_photo::<C, P, S>),
        )
        .route_layer(owner.clone())
        .route_layer(authenticated.clone())
        .route_layer(crud_deadline);

    let owned_upload = Router::new()
        .route("/mw/{id}/photo/add", post(handlers::add_photos::<C, P, S>))
        .route_layer(owner)
        .route_layer(authenticated)
        .route_layer(upload_deadline)
        .layer(body_limit);

    Router::new()
        .merge(reads)
        .merge(create)
        .merge(owned)
        .merge(owned_upload)
        .with_state(state)
}
