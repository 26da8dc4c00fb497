//! # Domain Layer
//!
//! Request/response models, the rewrite prompt, and the LLM error taxonomy.
//! This layer is independent of external frameworks and infrastructure.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
