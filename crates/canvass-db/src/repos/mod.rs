//! Repository modules implementing storage for every canvass entity.
//!
//! Each module adds methods to `CanvassDb` via `impl CanvassDb` blocks that
//! return [`DatabaseError`](crate::error::DatabaseError). The `canvass-core`
//! repository traits are implemented here by delegating to those methods and
//! converting errors at the boundary.

pub mod answer;
pub mod bank;
pub mod link;
pub mod survey;

use canvass_core::entities::{
    Classification, NewAnswer, NewBankQuestion, NewLink, NewSurvey, QuestionBankEntry,
    QuestionType, ResponseAnswer, Survey, SurveyQuestionLink,
};
use canvass_core::enums::SurveyState;
use canvass_core::errors::StoreError;
use canvass_core::repos::{AnswerRepo, LinkRepo, QuestionBankRepo, SurveyRepo};

use crate::CanvassDb;

impl SurveyRepo for CanvassDb {
    async fn insert_survey(&self, survey: &NewSurvey) -> Result<Survey, StoreError> {
        Self::insert_survey(self, survey).await.map_err(Into::into)
    }

    async fn get_survey(&self, id: &str) -> Result<Option<Survey>, StoreError> {
        Self::get_survey(self, id).await.map_err(Into::into)
    }

    async fn update_survey(&self, survey: &Survey) -> Result<bool, StoreError> {
        Self::update_survey(self, survey).await.map_err(Into::into)
    }

    async fn update_survey_state(
        &self,
        id: &str,
        state: &SurveyState,
    ) -> Result<bool, StoreError> {
        Self::update_survey_state(self, id, state)
            .await
            .map_err(Into::into)
    }

    async fn delete_survey(&self, id: &str) -> Result<bool, StoreError> {
        Self::delete_survey(self, id).await.map_err(Into::into)
    }

    async fn list_surveys(&self) -> Result<Vec<Survey>, StoreError> {
        Self::list_surveys(self).await.map_err(Into::into)
    }

    async fn list_surveys_by_state(&self, state: &SurveyState) -> Result<Vec<Survey>, StoreError> {
        Self::list_surveys_by_state(self, state)
            .await
            .map_err(Into::into)
    }
}

impl LinkRepo for CanvassDb {
    async fn insert_link(&self, link: &NewLink) -> Result<SurveyQuestionLink, StoreError> {
        Self::insert_link(self, link).await.map_err(Into::into)
    }

    async fn get_link(&self, id: &str) -> Result<Option<SurveyQuestionLink>, StoreError> {
        Self::get_link(self, id).await.map_err(Into::into)
    }

    async fn update_link(&self, link: &SurveyQuestionLink) -> Result<bool, StoreError> {
        Self::update_link(self, link).await.map_err(Into::into)
    }

    async fn delete_link(&self, id: &str) -> Result<bool, StoreError> {
        Self::delete_link(self, id).await.map_err(Into::into)
    }

    async fn delete_links_for_survey(&self, survey_id: &str) -> Result<u64, StoreError> {
        Self::delete_links_for_survey(self, survey_id)
            .await
            .map_err(Into::into)
    }

    async fn list_links_for_survey(
        &self,
        survey_id: &str,
    ) -> Result<Vec<SurveyQuestionLink>, StoreError> {
        Self::list_links_for_survey(self, survey_id)
            .await
            .map_err(Into::into)
    }

    async fn count_links_for_survey(&self, survey_id: &str) -> Result<u64, StoreError> {
        Self::count_links_for_survey(self, survey_id)
            .await
            .map_err(Into::into)
    }
}

impl QuestionBankRepo for CanvassDb {
    async fn insert_bank_question(
        &self,
        question: &NewBankQuestion,
    ) -> Result<QuestionBankEntry, StoreError> {
        Self::insert_bank_question(self, question)
            .await
            .map_err(Into::into)
    }

    async fn get_bank_question(&self, id: &str) -> Result<Option<QuestionBankEntry>, StoreError> {
        Self::get_bank_question(self, id).await.map_err(Into::into)
    }

    async fn update_bank_question(
        &self,
        question: &QuestionBankEntry,
    ) -> Result<bool, StoreError> {
        Self::update_bank_question(self, question)
            .await
            .map_err(Into::into)
    }

    async fn list_bank_questions(&self) -> Result<Vec<QuestionBankEntry>, StoreError> {
        Self::list_bank_questions(self).await.map_err(Into::into)
    }

    async fn search_bank_questions(
        &self,
        text: Option<&str>,
        type_id: Option<&str>,
    ) -> Result<Vec<QuestionBankEntry>, StoreError> {
        Self::search_bank_questions(self, text, type_id)
            .await
            .map_err(Into::into)
    }

    async fn find_question_type_by_name(
        &self,
        name: &str,
    ) -> Result<Option<QuestionType>, StoreError> {
        Self::find_question_type_by_name(self, name)
            .await
            .map_err(Into::into)
    }

    async fn get_question_type(&self, id: &str) -> Result<Option<QuestionType>, StoreError> {
        Self::get_question_type(self, id).await.map_err(Into::into)
    }

    async fn list_question_types(&self) -> Result<Vec<QuestionType>, StoreError> {
        Self::list_question_types(self).await.map_err(Into::into)
    }

    async fn find_classification_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Classification>, StoreError> {
        Self::find_classification_by_name(self, name)
            .await
            .map_err(Into::into)
    }

    async fn get_classification(&self, id: &str) -> Result<Option<Classification>, StoreError> {
        Self::get_classification(self, id).await.map_err(Into::into)
    }

    async fn list_classifications(&self) -> Result<Vec<Classification>, StoreError> {
        Self::list_classifications(self).await.map_err(Into::into)
    }
}

impl AnswerRepo for CanvassDb {
    async fn insert_answers_atomic(
        &self,
        answers: &[NewAnswer],
    ) -> Result<Vec<ResponseAnswer>, StoreError> {
        Self::insert_answers_atomic(self, answers)
            .await
            .map_err(Into::into)
    }

    async fn has_responded(&self, respondent_id: &str, survey_id: &str) -> Result<bool, StoreError> {
        Self::has_responded(self, respondent_id, survey_id)
            .await
            .map_err(Into::into)
    }

    async fn list_answers_for_survey(
        &self,
        survey_id: &str,
    ) -> Result<Vec<ResponseAnswer>, StoreError> {
        Self::list_answers_for_survey(self, survey_id)
            .await
            .map_err(Into::into)
    }

    async fn list_answers_for_respondent(
        &self,
        respondent_id: &str,
        survey_id: &str,
    ) -> Result<Vec<ResponseAnswer>, StoreError> {
        Self::list_answers_for_respondent(self, respondent_id, survey_id)
            .await
            .map_err(Into::into)
    }

    async fn list_answers_for_link(&self, link_id: &str) -> Result<Vec<ResponseAnswer>, StoreError> {
        Self::list_answers_for_link(self, link_id)
            .await
            .map_err(Into::into)
    }

    async fn delete_answers_for_respondent(
        &self,
        respondent_id: &str,
        survey_id: &str,
    ) -> Result<u64, StoreError> {
        Self::delete_answers_for_respondent(self, respondent_id, survey_id)
            .await
            .map_err(Into::into)
    }
}
