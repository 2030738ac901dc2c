use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Answer format of a question (single choice, open text, rating, ...).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionType {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Thematic grouping of questions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Classification {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}
