//! Entity Module

pub mod token;
pub mod user;
