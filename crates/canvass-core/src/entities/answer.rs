use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One respondent's answer to one survey question link.
///
/// Answers recorded together share the session bounds and feedback.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResponseAnswer {
    pub id: String,
    pub link_id: String,
    pub respondent_id: String,
    pub value: String,
    pub answered_at: DateTime<Utc>,
    pub session_started_at: DateTime<Utc>,
    pub session_ended_at: DateTime<Utc>,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub link_id: String,
    pub respondent_id: String,
    pub value: String,
    pub answered_at: DateTime<Utc>,
    pub session_started_at: DateTime<Utc>,
    pub session_ended_at: DateTime<Utc>,
    pub feedback: Option<String>,
}
