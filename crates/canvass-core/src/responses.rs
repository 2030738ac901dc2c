//! Read models and operation outcomes returned by the engine.
//!
//! These structs are also the JSON shapes printed by the `canvass` CLI.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Survey, SurveyQuestionLink};

/// A link with its question materialized for display.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkDetail {
    pub link: SurveyQuestionLink,
    pub text: String,
    pub type_name: Option<String>,
    pub classification_name: Option<String>,
}

/// A survey with all of its questions, in presentation order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SurveyDetails {
    pub survey: Survey,
    pub questions: Vec<LinkDetail>,
}

/// Result of a metadata edit. `changed` is false when nothing differed and
/// no write happened.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub survey: Survey,
    pub changed: bool,
}

/// Result of deleting a survey and its links.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SurveyDeletion {
    pub survey_id: String,
    pub links_removed: u64,
    /// Set when removing the links failed; the survey delete was still attempted.
    pub cascade_error: Option<String>,
}

/// Result of copying a survey.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CopyOutcome {
    pub survey: Survey,
    pub links_copied: u32,
    pub links_failed: u32,
}

/// Result of recording a response session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionReceipt {
    pub recorded: u32,
    pub session_ended_at: Option<DateTime<Utc>>,
}
