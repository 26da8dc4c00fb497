use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The model's rewrite of a [`super::Question`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Answer {
    #[schema(example = "Please send me the report as soon as possible.")]
    response: String,
}

impl Answer {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    pub fn response(&self) -> &str {
        &self.response
    }
}
