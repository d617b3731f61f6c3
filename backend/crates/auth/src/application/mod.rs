//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod register;
pub mod session;
pub mod sign_in;

// Re-exports
pub use config::AuthConfig;
pub use register::RegisterUseCase;
pub use session::SessionManager;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
