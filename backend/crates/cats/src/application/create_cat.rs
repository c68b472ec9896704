//! Create Cat Use Case
//!
//! Inserts the cat, then uploads whatever photos came with it.

use std::sync::Arc;

use crate::application::add_photos::AddPhotosUseCase;
use crate::application::config::CatsConfig;
use crate::domain::entity::cat::CatFields;
use crate::domain::entity::photo::{PhotoUpload, UploadReport};
use crate::domain::repository::{CatPhotoRepository, CatRepository, PhotoStorage};
use crate::domain::value_object::{CatId, UserId};
use crate::error::{CatsError, CatsResult};

/// Create output
#[derive(Debug)]
pub struct CreateCatOutput {
    pub cat_id: CatId,
    pub photos: UploadReport,
}

pub struct CreateCatUseCase<C, P, S>
where
    C: CatRepository,
    P: CatPhotoRepository,
    S: PhotoStorage,
{
    cat_repo: Arc<C>,
    photo_repo: Arc<P>,
    storage: Arc<S>,
    config: Arc<CatsConfig>,
}

impl<C, P, S> CreateCatUseCase<C, P, S>
where
    C: CatRepository,
    P: CatPhotoRepository,
    S: PhotoStorage,
{
    pub fn new(cat_repo: Arc<C>, photo_repo: Arc<P>, storage: Arc<S>, config: Arc<CatsConfig>) -> Self {
        Self {
            cat_repo,
            photo_repo,
            storage,
            config,
        }
    }

    pub async fn execute(
        &self,
        owner: UserId,
        fields: CatFields,
        photos: Vec<PhotoUpload>,
    ) -> CatsResult<CreateCatOutput> {
        if photos.len() > self.config.max_files {
            return Err(CatsError::InvalidForm("too many files in form".to_string()));
        }

        let cat = self.cat_repo.create(owner, &fields).await?;

        tracing::info!(cat_id = %cat.id, owner = %owner, "Cat created");

        let report = AddPhotosUseCase::new(
            self.photo_repo.clone(),
            self.storage.clone(),
            self.config.clone(),
        )
        .upload_batch(cat.id, photos)
        .await;

        Ok(CreateCatOutput {
            cat_id: cat.id,
            photos: report,
        })
    }
}
