//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::{Work, WorkDraft};
pub use repository::WorkRepository;
