pub mod container;
pub mod controller;
pub mod openapi;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use controller::{AppState, ErrorResponse, HealthResponse, LLM_FAILURE_DETAIL};
pub use openapi::{openapi, ApiDoc};
pub use router::build_router;
