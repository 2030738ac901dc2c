use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where a survey question comes from: the shared bank, or written inline
/// for this survey only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionSource {
    Bank {
        question_id: String,
    },
    Inline {
        text: String,
        type_id: String,
        classification_id: Option<String>,
    },
}

impl QuestionSource {
    #[must_use]
    pub fn bank_question_id(&self) -> Option<&str> {
        match self {
            Self::Bank { question_id } => Some(question_id),
            Self::Inline { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_inline(&self) -> bool {
        matches!(self, Self::Inline { .. })
    }
}

/// Binds one question to a survey at a 1-based position.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SurveyQuestionLink {
    pub id: String,
    pub survey_id: String,
    pub source: QuestionSource,
    pub position: u32,
    /// Screening question: respondents matching the criterion are discarded.
    pub is_discard: bool,
    pub discard_criterion: Option<String>,
}

impl SurveyQuestionLink {
    /// Same question, placement, and discard metadata under another survey.
    #[must_use]
    pub fn duplicate_for(&self, survey_id: &str) -> NewLink {
        NewLink {
            survey_id: survey_id.to_string(),
            source: self.source.clone(),
            position: self.position,
            is_discard: self.is_discard,
            discard_criterion: self.discard_criterion.clone(),
        }
    }
}

/// A link row ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub survey_id: String,
    pub source: QuestionSource,
    pub position: u32,
    pub is_discard: bool,
    pub discard_criterion: Option<String>,
}
