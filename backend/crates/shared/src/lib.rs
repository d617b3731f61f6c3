//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Common primitive value objects (ID types, pagination windows)
//! - Cross-cutting validation rules
//! - The uniform success/error response envelopes and request extractors
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
    pub mod store;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod pagination;
#[cfg(feature = "axum")]
pub mod response;
pub mod validation;
