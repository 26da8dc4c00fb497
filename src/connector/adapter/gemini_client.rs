use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::LlmClient;
use crate::config::ConfigError;
use crate::domain::LlmError;

const MODELS_PATH: &str = "/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";
/// Upper bound on how much of an error body ends up in a log line.
const MAX_ERROR_BODY: usize = 512;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Minimal subset of the `generateContent` response we care about.
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP client for the Gemini `generateContent` REST endpoint.
///
/// The base URL is configurable so the client can target a regional
/// endpoint, a proxy, or a local stub in tests.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + MODELS_PATH + model + `:generateContent`).
    url: String,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let api_key: String = api_key.into();
        let model: String = model.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::Missing("LLM_API_KEY"));
        }
        if model.trim().is_empty() {
            return Err(ConfigError::Missing("MODEL_NAME"));
        }

        let base: String = base_url.into();
        let url = format!(
            "{}{MODELS_PATH}/{}:generateContent",
            base.trim_end_matches('/'),
            model.trim()
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model,
            url,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    fn classify_send_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::network(format!("GeminiClient: request failed: {err}"))
        }
    }
}

/// Map a non-success status and its body onto an [`LlmError`].
fn classify_status(status: StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| truncate(body, MAX_ERROR_BODY).to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::authentication(message),
        // Gemini reports a bad key as 400 INVALID_ARGUMENT.
        StatusCode::BAD_REQUEST if message.contains("API key") => {
            LlmError::authentication(message)
        }
        StatusCode::TOO_MANY_REQUESTS => LlmError::rate_limited(message),
        _ => LlmError::provider(status.as_u16(), message),
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Result<String, LlmError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyResponse)?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        debug!("GeminiClient: finish reason {reason}");
    }

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        if !status.is_success() {
            warn!(
                "GeminiClient: API returned {status}: {}",
                truncate(&body, MAX_ERROR_BODY)
            );
            return Err(classify_status(status, &body));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::malformed(format!("GeminiClient: failed to parse response: {e}"))
        })?;

        extract_text(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
