use std::sync::Arc;

use tracing::debug;

use crate::application::{AskQuestionUseCase, LlmClient};
use crate::config::{ConfigError, Settings};
use crate::connector::adapter::{GeminiClient, MockLlmClient};

pub struct ContainerConfig {
    /// Answer from an in-process mock instead of calling the provider.
    pub mock_llm: bool,
}

/// Binds the configured LLM client into the use cases that need it.
pub struct Container {
    settings: Arc<Settings>,
    ask_use_case: Arc<AskQuestionUseCase>,
}

impl Container {
    pub fn new(settings: Settings, config: ContainerConfig) -> Result<Self, ConfigError> {
        let client: Arc<dyn LlmClient> = if config.mock_llm {
            debug!("Using mock LLM client");
            Arc::new(MockLlmClient::new())
        } else {
            debug!(
                "Using Gemini client at {} with model {}",
                settings.llm_base_url, settings.model_name
            );
            Arc::new(GeminiClient::new(
                settings.llm_api_key.clone(),
                settings.model_name.clone(),
                settings.llm_base_url.clone(),
                settings.llm_timeout,
            )?)
        };

        Ok(Self::with_client(settings, client))
    }

    /// Build a container around an already constructed client.
    pub fn with_client(settings: Settings, client: Arc<dyn LlmClient>) -> Self {
        let ask_use_case =
            Arc::new(AskQuestionUseCase::new(client).with_timeout(settings.llm_timeout));

        Self {
            settings: Arc::new(settings),
            ask_use_case,
        }
    }

    pub fn ask_use_case(&self) -> Arc<AskQuestionUseCase> {
        self.ask_use_case.clone()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::from_lookup(|key| match key {
            "PROJECT_NAME" => Some("Formalize".into()),
            "SERVER_NAME" => Some("formalize-test".into()),
            "SERVER_HOST" => Some("http://localhost:8000".into()),
            "LLM_API_KEY" => Some("test-key".into()),
            "LLM_TIMEOUT_SECS" => Some("7".into()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn mock_container_uses_mock_model() {
        let container = Container::new(settings(), ContainerConfig { mock_llm: true }).unwrap();
        assert_eq!(container.ask_use_case().model_name(), "mock-llm");
    }

    #[test]
    fn gemini_container_binds_configured_model_and_timeout() {
        let container = Container::new(settings(), ContainerConfig { mock_llm: false }).unwrap();
        let use_case = container.ask_use_case();
        assert_eq!(use_case.model_name(), "gemini-2.0-flash");
        assert_eq!(use_case.timeout(), std::time::Duration::from_secs(7));
    }
}
