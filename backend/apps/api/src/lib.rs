//! API Server
//!
//! Composition root: configuration, router assembly and the HTTP surface
//! shared by the binary and the integration tests.

pub mod app;
pub mod config;

