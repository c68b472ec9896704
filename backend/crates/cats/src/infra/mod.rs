//! Infrastructure Layer
//!
//! Database and object store implementations of the repository traits.

pub mod object_storage;
pub mod postgres;
