use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::Settings;

use super::controller::{ask, health, not_found, AppState};
use super::openapi::openapi;

/// Assemble the HTTP application: routes and the OpenAPI document under the
/// API prefix, CORS for the configured origins, request tracing, and a JSON
/// 404 fallback.
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    let doc = Arc::new(openapi(settings));

    let api = Router::new()
        .route("/ask/", post(ask))
        .route("/ask", post(ask))
        .route("/health", get(health))
        .route(
            "/openapi.json",
            get(move || async move { Json(doc.as_ref().clone()) }),
        );

    let app = if settings.api_prefix.is_empty() {
        api
    } else {
        Router::new().nest(&settings.api_prefix, api)
    };

    let app = app
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors_layer(&settings.cors_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring CORS origin {origin}: {e}");
                None
            }
        })
        .collect();

    // Wildcards cannot be combined with credentials, so methods and headers are mirrored.
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request()),
    )
}
