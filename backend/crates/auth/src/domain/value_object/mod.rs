//! Value Object Module

pub mod login;
pub mod token_kind;
pub mod user_password;

pub use kernel::id::UserId;
