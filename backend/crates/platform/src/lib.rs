//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Signed tokens and random material (HMAC-SHA256, Base64)
//! - Cookie and client-origin helpers
//! - Store call deadlines
//! - The request pipeline layers (request id, request logging, CORS)

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod deadline;
pub mod password;
pub mod request;
