pub mod application;
pub mod cli;
pub mod config;
pub mod connector;
pub mod domain;

pub use application::{AskQuestionUseCase, LlmClient};

pub use cli::Commands;

pub use config::{ConfigError, Settings};

pub use connector::{
    build_router, AppState, Container, ContainerConfig, ErrorResponse, GeminiClient,
    HealthResponse, MockLlmClient, LLM_FAILURE_DETAIL,
};

pub use domain::{Answer, FormalRewritePrompt, LlmError, Question, FORMAL_REWRITE_INSTRUCTION};
