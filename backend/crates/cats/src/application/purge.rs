//! User Resource Purge
//!
//! Removes every cat of a user ahead of account deletion.

use std::sync::Arc;

use auth::UserResourcePurger;
use kernel::error::app_error::AppResult;

use crate::application::delete_cat::DeleteCatUseCase;
use crate::domain::repository::{CatPhotoRepository, CatRepository, PhotoStorage};
use crate::domain::value_object::UserId;
use crate::error::CatsError;

/// Purger handed to the auth context
#[derive(Clone)]
pub struct CatsPurger<C, P, S>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    cat_repo: Arc<C>,
    photo_repo: Arc<P>,
    storage: Arc<S>,
}

impl<C, P, S> CatsPurger<C, P, S>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    pub fn new(cat_repo: Arc<C>, photo_repo: Arc<P>, storage: Arc<S>) -> Self {
        Self {
            cat_repo,
            photo_repo,
            storage,
        }
    }
}

impl<C, P, S> UserResourcePurger for CatsPurger<C, P, S>
where
    C: CatRepository + Clone + Send + Sync + 'static,
    P: CatPhotoRepository + Clone + Send + Sync + 'static,
    S: PhotoStorage + Clone + Send + Sync + 'static,
{
    async fn purge_user_resources(&self, user_id: UserId) -> AppResult<()> {
        let cat_ids = self
            .cat_repo
            .list_ids_by_owner(user_id)
            .await
            .map_err(CatsError::into_app_error)?;

        let delete = DeleteCatUseCase::new(
            self.cat_repo.clone(),
            self.photo_repo.clone(),
            self.storage.clone(),
        );

        for cat_id in &cat_ids {
            match delete.execute(*cat_id).await {
                // Deleted concurrently
                Ok(()) | Err(CatsError::CatNotFound) => {}
                Err(e) => {
                    tracing::error!(user_id = %user_id, cat_id = %cat_id, error = %e, "Cat purge failed");
                    return Err(e.into_app_error());
                }
            }
        }

        tracing::info!(user_id = %user_id, cats = cat_ids.len(), "User cats purged");
        Ok(())
    }
}
