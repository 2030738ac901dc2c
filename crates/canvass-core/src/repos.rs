//! Repository contracts consumed by the engine.
//!
//! One trait per entity family. Implementations own persistence only: no
//! business rules, no validation beyond what the schema enforces. Lookups
//! return `Option`, updates and deletes report whether a row was touched.
//!
//! Futures are awaited in place by a single caller, so the traits use plain
//! `async fn` without `Send` bounds.

#![allow(async_fn_in_trait)]

use crate::entities::{
    Classification, NewAnswer, NewBankQuestion, NewLink, NewSurvey, QuestionBankEntry,
    QuestionType, ResponseAnswer, Survey, SurveyQuestionLink,
};
use crate::enums::SurveyState;
use crate::errors::StoreError;

pub trait SurveyRepo {
    async fn insert_survey(&self, survey: &NewSurvey) -> Result<Survey, StoreError>;

    async fn get_survey(&self, id: &str) -> Result<Option<Survey>, StoreError>;

    /// Overwrite every metadata column of an existing survey.
    async fn update_survey(&self, survey: &Survey) -> Result<bool, StoreError>;

    async fn update_survey_state(&self, id: &str, state: &SurveyState)
    -> Result<bool, StoreError>;

    async fn delete_survey(&self, id: &str) -> Result<bool, StoreError>;

    async fn list_surveys(&self) -> Result<Vec<Survey>, StoreError>;

    async fn list_surveys_by_state(&self, state: &SurveyState) -> Result<Vec<Survey>, StoreError>;
}

pub trait LinkRepo {
    async fn insert_link(&self, link: &NewLink) -> Result<SurveyQuestionLink, StoreError>;

    async fn get_link(&self, id: &str) -> Result<Option<SurveyQuestionLink>, StoreError>;

    /// Overwrite position and discard metadata of an existing link.
    async fn update_link(&self, link: &SurveyQuestionLink) -> Result<bool, StoreError>;

    async fn delete_link(&self, id: &str) -> Result<bool, StoreError>;

    /// Remove every link of a survey, returning how many rows went away.
    async fn delete_links_for_survey(&self, survey_id: &str) -> Result<u64, StoreError>;

    /// Links of a survey ordered by position.
    async fn list_links_for_survey(
        &self,
        survey_id: &str,
    ) -> Result<Vec<SurveyQuestionLink>, StoreError>;

    async fn count_links_for_survey(&self, survey_id: &str) -> Result<u64, StoreError>;
}

pub trait QuestionBankRepo {
    async fn insert_bank_question(
        &self,
        question: &NewBankQuestion,
    ) -> Result<QuestionBankEntry, StoreError>;

    async fn get_bank_question(&self, id: &str) -> Result<Option<QuestionBankEntry>, StoreError>;

    /// Overwrite text, type, classification, and state; bumps `updated_at`.
    async fn update_bank_question(&self, question: &QuestionBankEntry)
    -> Result<bool, StoreError>;

    async fn list_bank_questions(&self) -> Result<Vec<QuestionBankEntry>, StoreError>;

    /// Case-insensitive substring match on text, optionally restricted to a type.
    async fn search_bank_questions(
        &self,
        text: Option<&str>,
        type_id: Option<&str>,
    ) -> Result<Vec<QuestionBankEntry>, StoreError>;

    async fn find_question_type_by_name(
        &self,
        name: &str,
    ) -> Result<Option<QuestionType>, StoreError>;

    async fn get_question_type(&self, id: &str) -> Result<Option<QuestionType>, StoreError>;

    async fn list_question_types(&self) -> Result<Vec<QuestionType>, StoreError>;

    async fn find_classification_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Classification>, StoreError>;

    async fn get_classification(&self, id: &str) -> Result<Option<Classification>, StoreError>;

    async fn list_classifications(&self) -> Result<Vec<Classification>, StoreError>;
}

pub trait AnswerRepo {
    /// Insert the whole batch in one transaction: every row or none.
    async fn insert_answers_atomic(
        &self,
        answers: &[NewAnswer],
    ) -> Result<Vec<ResponseAnswer>, StoreError>;

    /// Whether any answer joins this respondent to a link of this survey.
    async fn has_responded(&self, respondent_id: &str, survey_id: &str)
    -> Result<bool, StoreError>;

    /// Every answer to the survey, grouped by respondent in link order.
    async fn list_answers_for_survey(
        &self,
        survey_id: &str,
    ) -> Result<Vec<ResponseAnswer>, StoreError>;

    /// One respondent's answers to a survey, in link order.
    async fn list_answers_for_respondent(
        &self,
        respondent_id: &str,
        survey_id: &str,
    ) -> Result<Vec<ResponseAnswer>, StoreError>;

    async fn list_answers_for_link(&self, link_id: &str) -> Result<Vec<ResponseAnswer>, StoreError>;

    /// Remove one respondent's answers to a survey. Returns the rows removed.
    async fn delete_answers_for_respondent(
        &self,
        respondent_id: &str,
        survey_id: &str,
    ) -> Result<u64, StoreError>;
}
