use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A piece of casual text submitted for rewriting.
///
/// Emptiness is not rejected here: a blank query still reaches the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    #[schema(example = "hey can u send me the report asap")]
    query: String,
}

impl Question {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query with surrounding whitespace removed, as embedded in the prompt.
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_query_field() {
        let question: Question = serde_json::from_str(r#"{"query": "  hi there "}"#).unwrap();
        assert_eq!(question.query(), "  hi there ");
        assert_eq!(question.trimmed_query(), "hi there");
    }

    #[test]
    fn rejects_missing_or_mistyped_query() {
        assert!(serde_json::from_str::<Question>("{}").is_err());
        assert!(serde_json::from_str::<Question>(r#"{"query": 42}"#).is_err());
        assert!(serde_json::from_str::<Question>(r#"{"query": null}"#).is_err());
    }

    #[test]
    fn ignores_unknown_fields() {
        let question: Question =
            serde_json::from_str(r#"{"query": "x", "history": []}"#).unwrap();
        assert_eq!(question.query(), "x");
    }
}
