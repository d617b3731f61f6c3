//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{session::SessionRecord, user::User, user::UserDraft};
pub use repository::{SessionRepository, UserRepository};
