//! Duplicate-response guard.

use canvass_core::errors::SurveyError;
use canvass_core::repos::AnswerRepo;

/// Answers whether a respondent has already completed a survey.
pub struct ResponseGuard<'a, A> {
    answers: &'a A,
}

impl<'a, A: AnswerRepo> ResponseGuard<'a, A> {
    pub const fn new(answers: &'a A) -> Self {
        Self { answers }
    }

    /// True iff at least one stored answer joins `respondent_id` to a link
    /// of `survey_id`.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Store` if the lookup fails.
    pub async fn has_responded(
        &self,
        respondent_id: &str,
        survey_id: &str,
    ) -> Result<bool, SurveyError> {
        Ok(self.answers.has_responded(respondent_id, survey_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::association::{LinkPlacement, QuestionAssociation};
    use crate::participation::{ParticipationRecorder, SessionSubmission, SubmittedAnswer};
    use crate::test_support::helpers::{insert_survey, jan, seed_bank, test_db};

    #[tokio::test]
    async fn flips_after_a_recorded_session() {
        let db = test_db().await;
        let survey = insert_survey(&db).await;
        let other = insert_survey(&db).await;
        let bank = seed_bank(&db, 1).await;
        let link = QuestionAssociation::new(&db)
            .attach_bank_question(&survey.id, &bank[0].id, LinkPlacement::at(1))
            .await
            .unwrap();
        let guard = ResponseGuard::new(&db);
        assert!(!guard.has_responded("user-7", &survey.id).await.unwrap());

        ParticipationRecorder::new(&db)
            .record_session_at(
                SessionSubmission {
                    survey_id: survey.id.clone(),
                    started_at: jan(10),
                    feedback: None,
                    answers: vec![SubmittedAnswer {
                        link_id: link.id,
                        respondent_id: "user-7".into(),
                        value: "5".into(),
                        answered_at: None,
                    }],
                },
                jan(10),
            )
            .await
            .unwrap();

        assert!(guard.has_responded("user-7", &survey.id).await.unwrap());
        assert!(!guard.has_responded("user-7", &other.id).await.unwrap());
        assert!(!guard.has_responded("user-8", &survey.id).await.unwrap());
    }
}
