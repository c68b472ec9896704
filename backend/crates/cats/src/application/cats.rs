//! Cat Read and Update Use Cases

use std::sync::Arc;

use crate::domain::entity::cat::{Cat, CatFields, CatSummary, CatWithPhotos};
use crate::domain::repository::CatRepository;
use crate::domain::value_object::{
    CatId,
    cat_profile::{CatAge, CatDescription, CatName},
};
use crate::error::{CatsError, CatsResult};

/// Raw profile fields as received from a client
pub struct CatInput {
    pub name: String,
    pub age: i32,
    pub description: String,
}

impl CatInput {
    pub fn validate(self) -> CatsResult<CatFields> {
        Ok(CatFields {
            name: CatName::new(&self.name)?,
            age: CatAge::new(self.age)?,
            description: CatDescription::new(self.description)?,
        })
    }
}

pub struct GetCatUseCase<C>
where
    C: CatRepository,
{
    cat_repo: Arc<C>,
}

impl<C> GetCatUseCase<C>
where
    C: CatRepository,
{
    pub fn new(cat_repo: Arc<C>) -> Self {
        Self { cat_repo }
    }

    pub async fn execute(&self, cat_id: CatId) -> CatsResult<CatWithPhotos> {
        self.cat_repo
            .find_with_photos(cat_id)
            .await?
            .ok_or(CatsError::CatNotFound)
    }
}

pub struct ListCatsUseCase<C>
where
    C: CatRepository,
{
    cat_repo: Arc<C>,
}

impl<C> ListCatsUseCase<C>
where
    C: CatRepository,
{
    pub fn new(cat_repo: Arc<C>) -> Self {
        Self { cat_repo }
    }

    pub async fn execute(&self) -> CatsResult<Vec<CatSummary>> {
        self.cat_repo.list().await
    }
}

/// Full update and the single-field patches
pub struct UpdateCatUseCase<C>
where
    C: CatRepository,
{
    cat_repo: Arc<C>,
}

impl<C> UpdateCatUseCase<C>
where
    C: CatRepository,
{
    pub fn new(cat_repo: Arc<C>) -> Self {
        Self { cat_repo }
    }

    pub async fn replace(&self, cat_id: CatId, input: CatInput) -> CatsResult<Cat> {
        let fields = input.validate()?;
        let cat = self.cat_repo.update(cat_id, &fields).await?;

        tracing::info!(cat_id = %cat_id, "Cat updated");
        Ok(cat)
    }

    pub async fn rename(&self, cat_id: CatId, name: &str) -> CatsResult<()> {
        let name = CatName::new(name)?;
        self.cat_repo.update_name(cat_id, &name).await
    }

    pub async fn set_age(&self, cat_id: CatId, age: i32) -> CatsResult<()> {
        let age = CatAge::new(age)?;
        self.cat_repo.update_age(cat_id, age).await
    }

    pub async fn set_description(&self, cat_id: CatId, description: String) -> CatsResult<()> {
        let description = CatDescription::new(description)?;
        self.cat_repo.update_description(cat_id, &description).await
    }
}
