//! Photo Use Cases
//!
//! Read a photo, pick the primary one, delete one.

use std::sync::Arc;

use crate::domain::entity::photo::CatPhoto;
use crate::domain::repository::{CatPhotoRepository, PhotoStorage};
use crate::domain::value_object::{CatId, PhotoId};
use crate::error::{CatsError, CatsResult};

pub struct GetPhotoUseCase<P>
where
    P: CatPhotoRepository,
{
    photo_repo: Arc<P>,
}

impl<P> GetPhotoUseCase<P>
where
    P: CatPhotoRepository,
{
    pub fn new(photo_repo: Arc<P>) -> Self {
        Self { photo_repo }
    }

    pub async fn execute(&self, photo_id: PhotoId) -> CatsResult<CatPhoto> {
        self.photo_repo
            .find_by_id(photo_id)
            .await?
            .ok_or(CatsError::PhotoNotFound)
    }
}

pub struct SetPrimaryPhotoUseCase<P>
where
    P: CatPhotoRepository,
{
    photo_repo: Arc<P>,
}

impl<P> SetPrimaryPhotoUseCase<P>
where
    P: CatPhotoRepository,
{
    pub fn new(photo_repo: Arc<P>) -> Self {
        Self { photo_repo }
    }

    pub async fn execute(&self, cat_id: CatId, photo_id: PhotoId) -> CatsResult<()> {
        self.photo_repo.set_primary(cat_id, photo_id).await?;

        tracing::info!(cat_id = %cat_id, photo_id = %photo_id, "Primary photo set");
        Ok(())
    }
}

/// Blob first, then row
pub struct DeletePhotoUseCase<P, S>
where
    P: CatPhotoRepository,
    S: PhotoStorage,
{
    photo_repo: Arc<P>,
    storage: Arc<S>,
}

impl<P, S> DeletePhotoUseCase<P, S>
where
    P: CatPhotoRepository,
    S: PhotoStorage,
{
    pub fn new(photo_repo: Arc<P>, storage: Arc<S>) -> Self {
        Self {
            photo_repo,
            storage,
        }
    }

    pub async fn execute(&self, cat_id: CatId, photo_id: PhotoId) -> CatsResult<()> {
        let photo = self
            .photo_repo
            .find_by_id(photo_id)
            .await?
            .ok_or(CatsError::PhotoNotFound)?;

        if photo.cat_id != cat_id {
            return Err(CatsError::PhotoNotOwned);
        }

        self.storage.delete(&photo.object_key).await?;
        self.photo_repo.delete(photo_id).await?;

        tracing::info!(cat_id = %cat_id, photo_id = %photo_id, "Photo deleted");
        Ok(())
    }
}
