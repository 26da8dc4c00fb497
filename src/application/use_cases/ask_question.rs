use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::application::LlmClient;
use crate::domain::{Answer, FormalRewritePrompt, LlmError, Question};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Rewrites a [`Question`] into a formal [`Answer`] with one LLM call.
pub struct AskQuestionUseCase {
    client: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl AskQuestionUseCase {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Every provider failure is logged with its kind and returned; the
    /// caller decides how much of it to expose. The model text is passed
    /// through verbatim, only an empty reply counts as a failure.
    pub async fn execute(&self, question: &Question) -> Result<Answer, LlmError> {
        let prompt = FormalRewritePrompt::render(question);
        debug!(
            model = self.client.model_name(),
            prompt_len = prompt.len(),
            "Sending formal rewrite prompt"
        );

        let result = match timeout(self.timeout, self.client.generate(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout)),
        };

        let text = result
            .and_then(|text| {
                if text.is_empty() {
                    Err(LlmError::EmptyResponse)
                } else {
                    Ok(text)
                }
            })
            .inspect_err(|e| {
                warn!(
                    model = self.client.model_name(),
                    kind = %e.kind(),
                    error = %e,
                    "Error communicating with LLM"
                );
            })?;

        debug!(response_len = text.len(), "LLM response received");
        Ok(Answer::new(text))
    }
}
