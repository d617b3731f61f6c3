//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::WorksAppState;
pub use router::{works_private_router, works_router};
