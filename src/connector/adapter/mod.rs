mod gemini_client;
mod mock_llm_client;

pub use gemini_client::*;
pub use mock_llm_client::*;
