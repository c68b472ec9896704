//! Ownership Check Use Case

use std::sync::Arc;

use crate::domain::repository::CatRepository;
use crate::domain::value_object::{CatId, UserId};
use crate::error::{CatsError, CatsResult};

pub struct CheckOwnershipUseCase<C>
where
    C: CatRepository,
{
    cat_repo: Arc<C>,
}

impl<C> CheckOwnershipUseCase<C>
where
    C: CatRepository,
{
    pub fn new(cat_repo: Arc<C>) -> Self {
        Self { cat_repo }
    }

    /// `Ok(false)` when the cat belongs to someone else,
    /// `CatNotFound` when it does not exist.
    pub async fn execute(&self, user_id: UserId, cat_id: CatId) -> CatsResult<bool> {
        let owner = self
            .cat_repo
            .owner_of(cat_id)
            .await?
            .ok_or(CatsError::CatNotFound)?;

        Ok(owner == user_id)
    }
}
