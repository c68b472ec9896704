//! Application Layer
//!
//! Use cases and application services.

pub mod add_photos;
pub mod cats;
pub mod config;
pub mod create_cat;
pub mod delete_cat;
pub mod ownership;
pub mod photos;
pub mod purge;

// Re-exports
pub use add_photos::AddPhotosUseCase;
pub use cats::{CatInput, GetCatUseCase, ListCatsUseCase, UpdateCatUseCase};
pub use config::CatsConfig;
pub use create_cat::{CreateCatOutput, CreateCatUseCase};
pub use delete_cat::DeleteCatUseCase;
pub use ownership::CheckOwnershipUseCase;
pub use photos::{DeletePhotoUseCase, GetPhotoUseCase, SetPrimaryPhotoUseCase};
pub use purge::CatsPurger;
