//! Ownership Middleware
//!
//! Runs behind the access-token middleware on `/mw/{id}` routes. Resolves
//! the cat id from the path once, checks the caller created that cat, and
//! hands the verified id to the handler as [`OwnedCat`].

use std::collections::HashMap;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use auth::AuthenticatedUser;

use crate::application::CheckOwnershipUseCase;
use crate::domain::repository::{CatPhotoRepository, CatRepository, PhotoStorage};
use crate::domain::value_object::CatId;
use crate::error::CatsError;
use crate::presentation::handlers::CatsAppState;

/// Cat id the caller is allowed to mutate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedCat(pub CatId);

pub async fn require_cat_owner<C, P, S>(
    State(state): State<CatsAppState<C, P, S>>,
    Path(params): Path<HashMap<String, String>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, CatsError>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    let cat_id: CatId = params
        .get("id")
        .ok_or_else(|| CatsError::InvalidForm("missing id".to_string()))?
        .parse()?;

    let user_id = req
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.user_id)
        .ok_or_else(|| CatsError::Internal("ownership check without authenticated user".into()))?;

    let is_owner = CheckOwnershipUseCase::new(state.cats.clone())
        .execute(user_id, cat_id)
        .await?;

    if !is_owner {
        tracing::warn!(user_id = %user_id, cat_id = %cat_id, "Cat mutation by non-owner");
        return Err(CatsError::NotOwner);
    }

    req.extensions_mut().insert(OwnedCat(cat_id));

    Ok(next.run(req).await)
}
