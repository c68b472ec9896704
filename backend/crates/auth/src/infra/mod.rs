//! Infrastructure Layer
//!
//! Database and cache implementations of the repository traits.

pub mod postgres;
pub mod token_store;
