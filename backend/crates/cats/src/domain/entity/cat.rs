//! Cat Entity

use chrono::{DateTime, Utc};

use crate::domain::entity::photo::PhotoRef;
use crate::domain::value_object::{
    CatId, PhotoId, UserId,
    cat_profile::{CatAge, CatDescription, CatName},
};

/// Registered cat
///
/// `created_by` is set once on insert and never updated.
#[derive(Debug, Clone)]
pub struct Cat {
    pub id: CatId,
    pub name: CatName,
    pub age: CatAge,
    pub description: CatDescription,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Validated profile fields for create and full update
#[derive(Debug, Clone)]
pub struct CatFields {
    pub name: CatName,
    pub age: CatAge,
    pub description: CatDescription,
}

/// Cat with every photo, primary first then by id
#[derive(Debug, Clone)]
pub struct CatWithPhotos {
    pub cat: Cat,
    pub photos: Vec<PhotoRef>,
}

/// List entry: a cat and its display photo
///
/// The display photo is the primary one, else the lowest-id one.
#[derive(Debug, Clone)]
pub struct CatSummary {
    pub id: CatId,
    pub name: CatName,
    pub age: CatAge,
    pub photo_id: Option<PhotoId>,
    pub url: Option<String>,
}
