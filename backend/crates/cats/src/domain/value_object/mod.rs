//! Value Object Module

pub mod cat_profile;
pub mod photo_upload;

pub use kernel::id::{CatId, PhotoId, UserId};
