//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    cat::{Cat, CatFields, CatSummary, CatWithPhotos},
    photo::{CatPhoto, NewCatPhoto, PhotoRef, PhotoUpload, UploadReport},
};
pub use repository::{CatPhotoRepository, CatRepository, PhotoStorage};
