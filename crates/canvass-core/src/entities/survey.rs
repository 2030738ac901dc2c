use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SurveyState;

/// A questionnaire with a validity window and a lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Survey {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub audience_size: u32,
    /// Respondent profile the survey targets. Opaque structured text (usually JSON).
    pub profile_definition: Option<String>,
    pub state: SurveyState,
    pub created_at: DateTime<Utc>,
    pub admin_id: String,
}

impl Survey {
    /// Whether a non-blank respondent profile has been defined.
    #[must_use]
    pub fn has_profile(&self) -> bool {
        self.profile_definition
            .as_deref()
            .is_some_and(|profile| !profile.trim().is_empty())
    }
}

/// A validated survey row ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSurvey {
    pub name: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub audience_size: u32,
    pub profile_definition: Option<String>,
    pub state: SurveyState,
    pub created_at: DateTime<Utc>,
    pub admin_id: String,
}
