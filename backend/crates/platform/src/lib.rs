//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id) with a byte-length policy
//! - Random identifiers for object keys
//! - Bearer credential extraction
//! - Request deadline middleware

pub mod bearer;
pub mod crypto;
pub mod deadline;
pub mod password;
