//! Works Backend Module
//!
//! Works are named collections of document links owned by the user who
//! created them.
//!
//! - `domain/` - Work entity, draft validation, repository trait
//! - `application/` - Use cases (browse, create, delete)
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! Reads are public. Creating and deleting go through the `/private`
//! routes and act on behalf of the authenticated user.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{WorkError, WorkResult};
pub use infra::{memory::MemoryWorkRepository, postgres::PgWorkRepository};
pub use presentation::{WorksAppState, works_private_router, works_router};
