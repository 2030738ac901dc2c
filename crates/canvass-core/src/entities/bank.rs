use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::BankQuestionState;

/// A reusable question template.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionBankEntry {
    pub id: String,
    pub text: String,
    pub type_id: String,
    pub classification_id: Option<String>,
    pub state: BankQuestionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBankQuestion {
    pub text: String,
    pub type_id: String,
    pub classification_id: Option<String>,
    pub state: BankQuestionState,
    pub created_by: Option<String>,
}
