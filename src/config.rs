//! # Configuration
//!
//! Process settings read once from the environment at startup. The resulting
//! [`Settings`] is immutable and handed to the container explicitly.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.0-flash";
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl ConfigError {
    pub fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

#[derive(Clone)]
pub struct Settings {
    pub project_name: String,
    pub server_name: String,
    pub server_host: String,
    pub api_prefix: String,
    pub cors_origins: Vec<String>,
    pub llm_api_key: String,
    pub model_name: String,
    pub llm_base_url: String,
    pub llm_timeout: Duration,
    pub bind_address: SocketAddr,
}

// The API key stays out of debug output.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("project_name", &self.project_name)
            .field("server_name", &self.server_name)
            .field("server_host", &self.server_host)
            .field("api_prefix", &self.api_prefix)
            .field("cors_origins", &self.cors_origins)
            .field("llm_api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_timeout", &self.llm_timeout)
            .field("bind_address", &self.bind_address)
            .finish()
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// | Variable               | Default                                     |
    /// |------------------------|---------------------------------------------|
    /// | `PROJECT_NAME`         | required                                    |
    /// | `SERVER_NAME`          | required                                    |
    /// | `SERVER_HOST`          | required, http(s) URL                       |
    /// | `BACKEND_CORS_ORIGINS` | none                                        |
    /// | `LLM_API_KEY`          | required                                    |
    /// | `MODEL_NAME`           | `gemini-2.0-flash`                          |
    /// | `LLM_BASE_URL`         | `https://generativelanguage.googleapis.com` |
    /// | `LLM_TIMEOUT_SECS`     | `30`                                        |
    /// | `API_PREFIX`           | `/api/v1`                                   |
    /// | `BIND_ADDRESS`         | `0.0.0.0:8000`                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let project_name = require("PROJECT_NAME")?;
        let server_name = require("SERVER_NAME")?;
        let server_host = parse_http_url("SERVER_HOST", &require("SERVER_HOST")?)?;

        let cors_origins = match get("BACKEND_CORS_ORIGINS") {
            Some(raw) => parse_cors_origins(&raw)?,
            None => Vec::new(),
        };

        let llm_api_key = require("LLM_API_KEY")?;
        let model_name = get("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());
        let llm_base_url = parse_http_url(
            "LLM_BASE_URL",
            &get("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
        )?;

        let llm_timeout = match get("LLM_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        };

        // An explicitly empty prefix mounts at the root, so it is not filtered like the others.
        let api_prefix = normalize_prefix(
            &lookup("API_PREFIX").unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
        );

        let bind_raw = get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("BIND_ADDRESS", format!("{bind_raw}: {e}")))?;

        Ok(Self {
            project_name,
            server_name,
            server_host,
            api_prefix,
            cors_origins,
            llm_api_key,
            model_name,
            llm_base_url,
            llm_timeout,
            bind_address,
        })
    }

    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }
}

/// Accepts either a comma separated list or a JSON array of origins.
pub fn parse_cors_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let raw = raw.trim();
    let entries: Vec<String> = if raw.starts_with('[') {
        serde_json::from_str(raw)
            .map_err(|e| ConfigError::invalid("BACKEND_CORS_ORIGINS", e.to_string()))?
    } else {
        raw.split(',').map(str::to_string).collect()
    };

    entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| parse_http_url("BACKEND_CORS_ORIGINS", entry))
        .collect()
}

fn parse_http_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {
            Ok(trimmed.to_string())
        }
        _ => Err(ConfigError::invalid(
            var,
            format!("'{raw}' is not an http(s) URL"),
        )),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid("LLM_TIMEOUT_SECS", "must be greater than zero")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::invalid("LLM_TIMEOUT_SECS", format!("{raw}: {e}"))),
    }
}

/// `"api/v1/"` becomes `"/api/v1"`; `""` and `"/"` become `""` (root).
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
