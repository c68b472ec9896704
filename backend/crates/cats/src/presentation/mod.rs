//! Presentation Layer
//!
//! HTTP handlers, DTOs, multipart reader, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod multipart;
pub mod router;

pub use handlers::CatsAppState;
pub use middleware::{OwnedCat, require_cat_owner};
pub use router::{cats_router, cats_router_generic};
