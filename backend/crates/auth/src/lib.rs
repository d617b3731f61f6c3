//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and the session manager
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration with email + password
//! - Sign-in / sign-out with server-side sessions and cookie tokens
//! - Authentication middleware for protected routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never returned to clients
//! - Session tokens HMAC-signed, sessions expire server-side
//! - Sign-in failures do not reveal whether the email exists

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::{
    AuthAppState, Authenticated, auth_private_router, auth_router, authenticate_user,
};
