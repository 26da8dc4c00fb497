//! Tests for the Gemini adapter against a local axum stub of the
//! `generateContent` endpoint.

use std::time::Duration;

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use formalize::{GeminiClient, LlmClient, LlmError};

const GOOD_KEY: &str = "good-key";

/// Behaves like the real endpoint for a handful of magic model names.
async fn generate_content(
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if key != GOOD_KEY {
        return (
            StatusCode::BAD_REQUEST,
            json!({"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}})
                .to_string(),
        );
    }

    let model = model_action.trim_end_matches(":generateContent");
    match model {
        "echo-model" => {
            let prompt = body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            (
                StatusCode::OK,
                json!({"candidates": [{"content": {"role": "model", "parts": [{"text": prompt}]}, "finishReason": "STOP"}]})
                    .to_string(),
            )
        }
        "quota-model" => (
            StatusCode::TOO_MANY_REQUESTS,
            json!({"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}})
                .to_string(),
        ),
        "broken-model" => (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable".to_string()),
        "garbage-model" => (StatusCode::OK, "<html>definitely not json</html>".to_string()),
        "blocked-model" => (
            StatusCode::OK,
            json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string(),
        ),
        "slow-model" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            (StatusCode::OK, "{}".to_string())
        }
        _ => (
            StatusCode::NOT_FOUND,
            json!({"error": {"code": 404, "message": format!("models/{model} is not found"), "status": "NOT_FOUND"}})
                .to_string(),
        ),
    }
}

async fn spawn_stub_server() -> String {
    let app = Router::new().route("/v1beta/models/{model_action}", post(generate_content));
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn client(base_url: &str, key: &str, model: &str) -> GeminiClient {
    GeminiClient::new(key, model, base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn returns_candidate_text() {
    let base = spawn_stub_server().await;
    let client = client(&base, GOOD_KEY, "echo-model");

    let text = client.generate("Rewrite this please").await.unwrap();
    assert_eq!(text, "Rewrite this please");
}

#[tokio::test]
async fn invalid_key_is_authentication_error() {
    let base = spawn_stub_server().await;
    let client = client(&base, "bad-key", "echo-model");

    let err = client.generate("hi").await.unwrap_err();
    assert!(matches!(err, LlmError::Authentication(ref m) if m.contains("API key not valid")));
}

#[tokio::test]
async fn quota_exhaustion_is_rate_limited() {
    let base = spawn_stub_server().await;
    let err = client(&base, GOOD_KEY, "quota-model")
        .generate("hi")
        .await
        .unwrap_err();
    assert_eq!(err, LlmError::rate_limited("Resource has been exhausted"));
}

#[tokio::test]
async fn server_error_is_provider_error() {
    let base = spawn_stub_server().await;
    let err = client(&base, GOOD_KEY, "broken-model")
        .generate("hi")
        .await
        .unwrap_err();
    assert_eq!(err, LlmError::provider(503, "upstream unavailable"));
}

#[tokio::test]
async fn unknown_model_is_provider_error() {
    let base = spawn_stub_server().await;
    let err = client(&base, GOOD_KEY, "no-such-model")
        .generate("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::Provider { status: 404, .. }));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let base = spawn_stub_server().await;
    let err = client(&base, GOOD_KEY, "garbage-model")
        .generate("hi")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "malformed_response");
}

#[tokio::test]
async fn blocked_prompt_is_empty_response() {
    let base = spawn_stub_server().await;
    let err = client(&base, GOOD_KEY, "blocked-model")
        .generate("hi")
        .await
        .unwrap_err();
    assert_eq!(err, LlmError::EmptyResponse);
}

#[tokio::test]
async fn slow_server_hits_client_timeout() {
    let base = spawn_stub_server().await;
    let client =
        GeminiClient::new(GOOD_KEY, "slow-model", &base, Duration::from_millis(200)).unwrap();

    let err = client.generate("hi").await.unwrap_err();
    assert_eq!(err, LlmError::Timeout(Duration::from_millis(200)));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Nothing listens on a freshly released port.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"), GOOD_KEY, "echo-model")
        .generate("hi")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "network");
}
