use std::time::Duration;

use thiserror::Error;

/// Failure talking to, or interpreting the reply of, the LLM provider.
///
/// The variants are kept apart so operators can tell an expired key from a
/// flaky network in the logs. Callers of the HTTP API never see them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Authentication rejected: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },
}

impl LlmError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn provider(status: u16, msg: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: msg.into(),
        }
    }

    /// Stable label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Timeout(_) => "timeout",
            Self::Authentication(_) => "authentication",
            Self::RateLimited(_) => "rate_limited",
            Self::MalformedResponse(_) => "malformed_response",
            Self::EmptyResponse => "empty_response",
            Self::Provider { .. } => "provider",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_are_distinct() {
        let errors = [
            LlmError::network("x"),
            LlmError::Timeout(Duration::from_secs(1)),
            LlmError::authentication("x"),
            LlmError::rate_limited("x"),
            LlmError::malformed("x"),
            LlmError::EmptyResponse,
            LlmError::provider(500, "x"),
        ];

        let mut kinds: Vec<_> = errors.iter().map(LlmError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn provider_error_displays_status() {
        let err = LlmError::provider(503, "overloaded");
        assert_eq!(err.to_string(), "Provider returned 503: overloaded");
    }
}
