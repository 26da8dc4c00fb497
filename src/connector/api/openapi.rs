use utoipa::OpenApi;

use crate::config::Settings;
use crate::domain::{Answer, Question};

use super::controller::{ask_controller, ErrorResponse, HealthResponse};

#[derive(OpenApi)]
#[openapi(
    paths(ask_controller::ask, ask_controller::health),
    components(schemas(Question, Answer, ErrorResponse, HealthResponse)),
    tags(
        (name = "rewrite", description = "Formal rewrite of casual text"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// The API document as served: titled after the project, paths under the API prefix.
pub fn openapi(settings: &Settings) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = settings.project_name.clone();
    doc.paths.paths = std::mem::take(&mut doc.paths.paths)
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", settings.api_prefix), item))
        .collect();
    doc
}
