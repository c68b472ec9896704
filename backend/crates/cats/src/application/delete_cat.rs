//! Delete Cat Use Case
//!
//! Blobs go first, then the photo rows and the cat row in one transaction.
//! A failed blob delete leaves the database untouched; because deleting a
//! missing blob succeeds, retrying the request converges.
//!
//! Photos uploaded between listing the keys and the transaction come back
//! from the transaction and are deleted after commit. Uploads that finish
//! after commit fail their row insert and remove their own blob.

use std::sync::Arc;

use crate::domain::repository::{CatPhotoRepository, CatRepository, PhotoStorage};
use crate::domain::value_object::CatId;
use crate::error::CatsResult;

pub struct DeleteCatUseCase<C, P, S>
where
    C: CatRepository,
    P: CatPhotoRepository,
    S: PhotoStorage,
{
    cat_repo: Arc<C>,
    photo_repo: Arc<P>,
    storage: Arc<S>,
}

impl<C, P, S> DeleteCatUseCase<C, P, S>
where
    C: CatRepository,
    P: CatPhotoRepository,
    S: PhotoStorage,
{
    pub fn new(cat_repo: Arc<C>, photo_repo: Arc<P>, storage: Arc<S>) -> Self {
        Self {
            cat_repo,
            photo_repo,
            storage,
        }
    }

    pub async fn execute(&self, cat_id: CatId) -> CatsResult<()> {
        let keys = self.photo_repo.object_keys_for_cat(cat_id).await?;

        for key in &keys {
            self.storage.delete(key).await?;
        }

        let removed = self.cat_repo.delete(cat_id).await?;

        let late: Vec<&String> = removed.iter().filter(|key| !keys.contains(*key)).collect();
        for key in &late {
            // The rows are gone, so a retry would not find this blob again
            if let Err(e) = self.storage.delete(key).await {
                tracing::error!(cat_id = %cat_id, key = %key, error = %e, "Orphaned photo blob left behind");
            }
        }

        tracing::info!(
            cat_id = %cat_id,
            photos = keys.len() + late.len(),
            "Cat deleted"
        );
        Ok(())
    }
}
