use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, Instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::AskQuestionUseCase;
use crate::connector::api::Container;
use crate::domain::{Answer, Question};

/// Body returned for every LLM failure, whatever its cause.
pub const LLM_FAILURE_DETAIL: &str = "Failed to get a response from the LLM.";

#[derive(Clone)]
pub struct AppState {
    ask_use_case: Arc<AskQuestionUseCase>,
    project_name: Arc<str>,
}

impl AppState {
    pub fn new(ask_use_case: Arc<AskQuestionUseCase>, project_name: impl Into<Arc<str>>) -> Self {
        Self {
            ask_use_case,
            project_name: project_name.into(),
        }
    }

    pub fn from_container(container: &Container) -> Self {
        Self::new(
            container.ask_use_case(),
            container.settings().project_name.as_str(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub project: String,
    pub model: String,
}

/// `POST /ask/`: rewrite the submitted query in a formal tone.
///
/// ```bash
/// curl -X POST http://127.0.0.1:8000/api/v1/ask/ \
///   -H 'content-type: application/json' \
///   -d '{"query":"hey can u send me the report asap"}'
/// ```
#[utoipa::path(
    post,
    path = "/ask/",
    operation_id = "ask_question",
    request_body = Question,
    responses(
        (status = 200, description = "Formal rewrite of the query", body = Answer),
        (status = 400, description = "Body is not a valid question", body = ErrorResponse),
        (status = 500, description = "The LLM call failed", body = ErrorResponse),
    ),
    tag = "rewrite",
)]
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<Question>, JsonRejection>,
) -> Response {
    let span = info_span!("ask", request_id = %Uuid::new_v4());

    async move {
        let Json(question) = match payload {
            Ok(payload) => payload,
            Err(rejection) => {
                debug!("Rejected request body: {}", rejection.body_text());
                return (
                    rejection_status(&rejection),
                    Json(ErrorResponse::new(rejection.body_text())),
                )
                    .into_response();
            }
        };

        info!(query_len = question.query().len(), "Rewrite requested");

        match state.ask_use_case.execute(&question).await {
            Ok(answer) => (StatusCode::OK, Json(answer)).into_response(),
            // Already logged with its cause by the use case.
            Err(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(LLM_FAILURE_DETAIL)),
            )
                .into_response(),
        }
    }
    .instrument(span)
    .await
}

/// Schema, syntax and content-type problems are the caller's malformed
/// question; anything else (an oversized body, a broken stream) keeps the
/// status axum assigns it.
fn rejection_status(rejection: &JsonRejection) -> StatusCode {
    match rejection {
        JsonRejection::JsonDataError(_)
        | JsonRejection::JsonSyntaxError(_)
        | JsonRejection::MissingJsonContentType(_) => StatusCode::BAD_REQUEST,
        other => other.status(),
    }
}

/// `GET /health`: liveness only, the provider is not contacted.
#[utoipa::path(
    get,
    path = "/health",
    operation_id = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "health",
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        project: state.project_name.to_string(),
        model: state.ask_use_case.model_name().to_string(),
    })
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not Found"))).into_response()
}
