//! Question bank management: registering reusable questions and browsing
//! the type and classification catalogs.

use serde::{Deserialize, Serialize};

use canvass_core::entities::{Classification, NewBankQuestion, QuestionBankEntry, QuestionType};
use canvass_core::enums::BankQuestionState;
use canvass_core::errors::SurveyError;
use canvass_core::repos::QuestionBankRepo;

/// Input for a new bank question. Type and classification are catalog ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankQuestionDraft {
    pub text: String,
    pub type_id: String,
    #[serde(default)]
    pub classification_id: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

pub struct QuestionBank<'a, B> {
    store: &'a B,
}

impl<'a, B: QuestionBankRepo> QuestionBank<'a, B> {
    pub const fn new(store: &'a B) -> Self {
        Self { store }
    }

    async fn require(&self, id: &str) -> Result<QuestionBankEntry, SurveyError> {
        self.store
            .get_bank_question(id)
            .await?
            .ok_or_else(|| SurveyError::not_found("bank question", id))
    }

    /// Add an active question to the bank.
    ///
    /// # Errors
    ///
    /// `Validation` for blank text, an unknown type id, or an unknown
    /// classification id.
    pub async fn register(&self, draft: BankQuestionDraft) -> Result<QuestionBankEntry, SurveyError> {
        let text = draft.text.trim();
        if text.is_empty() {
            return Err(SurveyError::validation("question text must not be blank"));
        }
        if self.store.get_question_type(&draft.type_id).await?.is_none() {
            return Err(SurveyError::validation(format!(
                "unknown question type '{}'",
                draft.type_id
            )));
        }
        if let Some(classification_id) = draft.classification_id.as_deref() {
            if self
                .store
                .get_classification(classification_id)
                .await?
                .is_none()
            {
                return Err(SurveyError::validation(format!(
                    "unknown classification '{classification_id}'"
                )));
            }
        }

        let entry = self
            .store
            .insert_bank_question(&NewBankQuestion {
                text: text.to_string(),
                type_id: draft.type_id,
                classification_id: draft.classification_id,
                state: BankQuestionState::Active,
                created_by: draft.created_by.filter(|c| !c.trim().is_empty()),
            })
            .await?;
        tracing::debug!(question_id = %entry.id, "registered bank question");
        Ok(entry)
    }

    /// # Errors
    ///
    /// `NotFound` for a missing question.
    pub async fn get(&self, id: &str) -> Result<QuestionBankEntry, SurveyError> {
        self.require(id).await
    }

    /// # Errors
    ///
    /// Returns `SurveyError::Store` if the listing fails.
    pub async fn list(&self) -> Result<Vec<QuestionBankEntry>, SurveyError> {
        Ok(self.store.list_bank_questions().await?)
    }

    /// Search by text substring and/or question type name.
    ///
    /// # Errors
    ///
    /// `Validation` for an unknown type name.
    pub async fn search(
        &self,
        text: Option<&str>,
        type_name: Option<&str>,
    ) -> Result<Vec<QuestionBankEntry>, SurveyError> {
        let type_id = match type_name {
            Some(name) => Some(self.resolve_type(name).await?.id),
            None => None,
        };
        let text = text.map(str::trim).filter(|t| !t.is_empty());
        Ok(self
            .store
            .search_bank_questions(text, type_id.as_deref())
            .await?)
    }

    /// # Errors
    ///
    /// `NotFound` for a missing question.
    pub async fn change_state(
        &self,
        id: &str,
        state: BankQuestionState,
    ) -> Result<QuestionBankEntry, SurveyError> {
        let mut entry = self.require(id).await?;
        if entry.state == state {
            return Ok(entry);
        }
        entry.state = state;
        self.save(&entry).await?;
        tracing::info!(question_id = id, state = %state, "bank question state changed");
        self.require(id).await
    }

    /// Replace the question text. Links that reference the question pick up
    /// the new wording.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing question, `Validation` for blank text.
    pub async fn edit_text(&self, id: &str, text: &str) -> Result<QuestionBankEntry, SurveyError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SurveyError::validation("question text must not be blank"));
        }
        let mut entry = self.require(id).await?;
        if entry.text == text {
            return Ok(entry);
        }
        entry.text = text.to_string();
        self.save(&entry).await?;
        self.require(id).await
    }

    async fn save(&self, entry: &QuestionBankEntry) -> Result<(), SurveyError> {
        if self.store.update_bank_question(entry).await? {
            Ok(())
        } else {
            Err(SurveyError::not_found("bank question", &entry.id))
        }
    }

    /// # Errors
    ///
    /// Returns `SurveyError::Store` if the listing fails.
    pub async fn question_types(&self) -> Result<Vec<QuestionType>, SurveyError> {
        Ok(self.store.list_question_types().await?)
    }

    /// # Errors
    ///
    /// Returns `SurveyError::Store` if the listing fails.
    pub async fn classifications(&self) -> Result<Vec<Classification>, SurveyError> {
        Ok(self.store.list_classifications().await?)
    }

    /// Look up a question type by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// `Validation` when no type has that name.
    pub async fn resolve_type(&self, name: &str) -> Result<QuestionType, SurveyError> {
        self.store
            .find_question_type_by_name(name)
            .await?
            .ok_or_else(|| {
                SurveyError::validation(format!("unknown question type '{}'", name.trim()))
            })
    }

    /// Look up a classification by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// `Validation` when no classification has that name.
    pub async fn resolve_classification(&self, name: &str) -> Result<Classification, SurveyError> {
        self.store
            .find_classification_by_name(name)
            .await?
            .ok_or_else(|| {
                SurveyError::validation(format!("unknown classification '{}'", name.trim()))
            })
    }
}
