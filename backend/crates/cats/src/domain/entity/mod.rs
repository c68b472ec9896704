//! Entity Module

pub mod cat;
pub mod photo;
