pub mod ask_controller;

pub use ask_controller::{
    ask, health, not_found, AppState, ErrorResponse, HealthResponse, LLM_FAILURE_DETAIL,
};
