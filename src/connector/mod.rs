//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - LLM clients (Gemini over HTTP, in-process mock)
//! - HTTP API (axum router, controllers, dependency container)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
