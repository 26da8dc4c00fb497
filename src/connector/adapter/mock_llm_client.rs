use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::LlmClient;
use crate::domain::{FormalRewritePrompt, LlmError};

enum Reply {
    /// Echo the user text found in the prompt.
    Echo,
    Fixed(String),
    Fail(LlmError),
}

/// In-process [`LlmClient`] that never touches the network.
///
/// Every prompt it receives is recorded so callers can inspect exactly what
/// would have been sent to a real provider.
pub struct MockLlmClient {
    reply: Reply,
    delay: Option<Duration>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::with_reply(Reply::Echo)
    }

    pub fn with_response(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fixed(text.into()))
    }

    pub fn failing(error: LlmError) -> Self {
        Self::with_reply(Reply::Fail(error))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|prompts| prompts.len()).unwrap_or(0)
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            Reply::Echo => {
                let original = FormalRewritePrompt::original_text(prompt).unwrap_or(prompt);
                debug!("MockLlmClient echoing {} bytes", original.len());
                Ok(format!("[mock] {original}"))
            }
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::Fail(error) => Err(error.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock-llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Question;

    #[tokio::test]
    async fn echo_returns_user_text() {
        let client = MockLlmClient::new();
        let prompt = FormalRewritePrompt::render(&Question::new("sup"));

        let reply = client.generate(&prompt).await.unwrap();
        assert_eq!(reply, "[mock] sup");
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn failing_client_records_the_attempt() {
        let client = MockLlmClient::failing(LlmError::network("connection refused"));

        assert!(client.generate("anything").await.is_err());
        assert_eq!(client.prompts(), vec!["anything".to_string()]);
    }
}
