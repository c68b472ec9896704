//! Cats Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and storage traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL repository, object store photo storage
//! - `presentation/` - HTTP handlers, DTOs, multipart reader, router, middleware
//!
//! ## Features
//! - Cat CRUD; every mutation is limited to the user who created the cat
//! - Photo batches uploaded to an S3-compatible bucket with per-file reports
//! - One primary photo per cat, swapped inside a transaction
//! - Purging a user's cats ahead of account deletion

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{CatsConfig, CatsPurger};
pub use domain::repository::{CatPhotoRepository, CatRepository, PhotoStorage};
pub use error::{CatsError, CatsResult};
pub use infra::object_storage::ObjectStorePhotoStorage;
pub use infra::postgres::PgCatRepository;
pub use presentation::router::{cats_router, cats_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
