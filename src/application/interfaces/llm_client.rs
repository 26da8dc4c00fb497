use async_trait::async_trait;

use crate::domain::LlmError;

/// An interface for sending a single prompt to a hosted LLM and receiving text.
///
/// Implementors own the transport and the vendor-specific wire format.
/// [`crate::application::AskQuestionUseCase`] only sees this trait.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Submit `prompt` and return the model's raw text reply.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Identifier of the model this client is bound to.
    fn model_name(&self) -> &str;
}
