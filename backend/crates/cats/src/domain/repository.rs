//! Repository Traits
//!
//! Interfaces for data persistence and blob storage. Implementations are in
//! the infrastructure layer.

use bytes::Bytes;

use crate::domain::entity::cat::{Cat, CatFields, CatSummary, CatWithPhotos};
use crate::domain::entity::photo::{CatPhoto, NewCatPhoto};
use crate::domain::value_object::{
    CatId, PhotoId, UserId,
    cat_profile::{CatAge, CatDescription, CatName},
};
use crate::error::CatsResult;

/// Cat repository trait
#[trait_variant::make(CatRepository: Send)]
pub trait LocalCatRepository {
    async fn create(&self, owner: UserId, fields: &CatFields) -> CatsResult<Cat>;

    async fn find_with_photos(&self, cat_id: CatId) -> CatsResult<Option<CatWithPhotos>>;

    /// `created_by` of the cat, `None` if it does not exist
    async fn owner_of(&self, cat_id: CatId) -> CatsResult<Option<UserId>>;

    /// Every cat with its display photo, ordered by id
    async fn list(&self) -> CatsResult<Vec<CatSummary>>;

    async fn list_ids_by_owner(&self, owner: UserId) -> CatsResult<Vec<CatId>>;

    /// `CatsError::CatNotFound` if no row was updated
    async fn update(&self, cat_id: CatId, fields: &CatFields) -> CatsResult<Cat>;

    async fn update_name(&self, cat_id: CatId, name: &CatName) -> CatsResult<()>;

    async fn update_age(&self, cat_id: CatId, age: CatAge) -> CatsResult<()>;

    async fn update_description(
        &self,
        cat_id: CatId,
        description: &CatDescription,
    ) -> CatsResult<()>;

    /// Delete the photo rows and the cat row in one transaction
    ///
    /// Returns the object keys of the photo rows that were removed.
    async fn delete(&self, cat_id: CatId) -> CatsResult<Vec<String>>;
}

/// Cat photo repository trait
#[trait_variant::make(CatPhotoRepository: Send)]
pub trait LocalCatPhotoRepository {
    async fn insert(&self, photo: &NewCatPhoto) -> CatsResult<CatPhoto>;

    async fn find_by_id(&self, photo_id: PhotoId) -> CatsResult<Option<CatPhoto>>;

    async fn object_keys_for_cat(&self, cat_id: CatId) -> CatsResult<Vec<String>>;

    /// Make `photo_id` the only primary photo of `cat_id`
    ///
    /// One transaction: check the photo belongs to the cat, clear every
    /// primary flag of the cat, set the new one. `PhotoNotFound` or
    /// `PhotoNotOwned` leave the flags untouched.
    async fn set_primary(&self, cat_id: CatId, photo_id: PhotoId) -> CatsResult<()>;

    /// Missing rows are not an error so a retried delete converges
    async fn delete(&self, photo_id: PhotoId) -> CatsResult<()>;
}

/// Blob store for photo bytes
#[trait_variant::make(PhotoStorage: Send)]
pub trait LocalPhotoStorage {
    /// Store the blob and return its public URL
    async fn put(&self, key: &str, data: Bytes, mime_type: &str) -> CatsResult<String>;

    /// Deleting a missing object succeeds
    async fn delete(&self, key: &str) -> CatsResult<()>;
}
