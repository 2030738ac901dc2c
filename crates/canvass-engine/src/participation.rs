//! Participation recording: one respondent's answers to one survey, stored
//! as a single all-or-nothing batch.
//!
//! The duplicate-response check runs before the batch insert, outside its
//! transaction. Two concurrent submissions from the same respondent can both
//! pass the check; the store has no per-respondent uniqueness constraint.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use canvass_core::entities::{NewAnswer, ResponseAnswer};
use canvass_core::errors::SurveyError;
use canvass_core::repos::{AnswerRepo, LinkRepo, SurveyRepo};
use canvass_core::responses::SessionReceipt;

use crate::guard::ResponseGuard;

/// One answer as submitted. `answered_at` defaults to the recording time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub link_id: String,
    pub respondent_id: String,
    pub value: String,
    #[serde(default)]
    pub answered_at: Option<DateTime<Utc>>,
}

/// A completed session: the answers plus what they share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSubmission {
    pub survey_id: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub feedback: Option<String>,
    pub answers: Vec<SubmittedAnswer>,
}

pub struct ParticipationRecorder<'a, S> {
    store: &'a S,
}

impl<'a, S> ParticipationRecorder<'a, S>
where
    S: SurveyRepo + LinkRepo + AnswerRepo,
{
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Record a session, stamping it as ended now.
    ///
    /// # Errors
    ///
    /// See [`Self::record_session_at`].
    pub async fn record_session(
        &self,
        submission: SessionSubmission,
    ) -> Result<SessionReceipt, SurveyError> {
        self.record_session_at(submission, Utc::now()).await
    }

    /// Record a session ending at `now`. An empty answer list is a no-op.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing survey. `Validation` when answers name
    /// different or blank respondents, reference links outside the survey,
    /// answer one link twice, or the respondent already has a session.
    /// `Store` if the batch insert fails, in which case nothing was written.
    pub async fn record_session_at(
        &self,
        submission: SessionSubmission,
        now: DateTime<Utc>,
    ) -> Result<SessionReceipt, SurveyError> {
        let Some(first) = submission.answers.first() else {
            tracing::debug!(survey_id = %submission.survey_id, "empty session, nothing recorded");
            return Ok(SessionReceipt {
                recorded: 0,
                session_ended_at: None,
            });
        };

        let respondent_id = first.respondent_id.trim().to_string();
        if respondent_id.is_empty() {
            return Err(SurveyError::validation("respondent id must not be blank"));
        }
        if submission
            .answers
            .iter()
            .any(|a| a.respondent_id.trim() != respondent_id)
        {
            return Err(SurveyError::validation(
                "every answer in a session must come from the same respondent",
            ));
        }

        let survey_id = submission.survey_id.as_str();
        self.require_survey(survey_id).await?;

        let survey_links: HashSet<String> = self
            .store
            .list_links_for_survey(survey_id)
            .await?
            .into_iter()
            .map(|link| link.id)
            .collect();
        let mut answered = HashSet::with_capacity(submission.answers.len());
        for answer in &submission.answers {
            if !survey_links.contains(&answer.link_id) {
                return Err(SurveyError::validation(format!(
                    "link {} is not part of survey {survey_id}",
                    answer.link_id
                )));
            }
            if !answered.insert(answer.link_id.as_str()) {
                return Err(SurveyError::validation(format!(
                    "link {} is answered more than once",
                    answer.link_id
                )));
            }
        }

        if ResponseGuard::new(self.store)
            .has_responded(&respondent_id, survey_id)
            .await?
        {
            return Err(SurveyError::validation(format!(
                "respondent {respondent_id} has already answered survey {survey_id}"
            )));
        }

        let feedback = submission.feedback.filter(|f| !f.trim().is_empty());
        let batch: Vec<NewAnswer> = submission
            .answers
            .iter()
            .map(|answer| NewAnswer {
                link_id: answer.link_id.clone(),
                respondent_id: respondent_id.clone(),
                value: answer.value.clone(),
                answered_at: answer.answered_at.unwrap_or(now),
                session_started_at: submission.started_at,
                session_ended_at: now,
                feedback: feedback.clone(),
            })
            .collect();

        let stored = self.store.insert_answers_atomic(&batch).await?;
        let recorded = u32::try_from(stored.len()).unwrap_or(u32::MAX);
        tracing::info!(survey_id, respondent_id = %respondent_id, recorded, "recorded response session");
        Ok(SessionReceipt {
            recorded,
            session_ended_at: Some(now),
        })
    }

    /// One respondent's answers to a survey, in link order.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank respondent, `NotFound` for a missing survey.
    pub async fn answers_for(
        &self,
        respondent_id: &str,
        survey_id: &str,
    ) -> Result<Vec<ResponseAnswer>, SurveyError> {
        let respondent_id = required_respondent(respondent_id)?;
        self.require_survey(survey_id).await?;
        Ok(self
            .store
            .list_answers_for_respondent(respondent_id, survey_id)
            .await?)
    }

    /// Every answer to a survey, grouped by respondent.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing survey.
    pub async fn answers_for_survey(
        &self,
        survey_id: &str,
    ) -> Result<Vec<ResponseAnswer>, SurveyError> {
        self.require_survey(survey_id).await?;
        Ok(self.store.list_answers_for_survey(survey_id).await?)
    }

    /// Every answer recorded against one link.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing link.
    pub async fn answers_for_link(&self, link_id: &str) -> Result<Vec<ResponseAnswer>, SurveyError> {
        if self.store.get_link(link_id).await?.is_none() {
            return Err(SurveyError::not_found("link", link_id));
        }
        Ok(self.store.list_answers_for_link(link_id).await?)
    }

    /// Discard a respondent's session for a survey so they can answer it
    /// again. Returns the number of answers removed; zero when there was no
    /// session.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank respondent, `NotFound` for a missing survey.
    pub async fn reset_session(
        &self,
        respondent_id: &str,
        survey_id: &str,
    ) -> Result<u64, SurveyError> {
        let respondent_id = required_respondent(respondent_id)?;
        self.require_survey(survey_id).await?;
        let removed = self
            .store
            .delete_answers_for_respondent(respondent_id, survey_id)
            .await?;
        tracing::info!(survey_id, respondent_id, removed, "reset response session");
        Ok(removed)
    }

    async fn require_survey(&self, survey_id: &str) -> Result<(), SurveyError> {
        if self.store.get_survey(survey_id).await?.is_none() {
            return Err(SurveyError::not_found("survey", survey_id));
        }
        Ok(())
    }
}

fn required_respondent(respondent_id: &str) -> Result<&str, SurveyError> {
    let trimmed = respondent_id.trim();
    if trimmed.is_empty() {
        return Err(SurveyError::validation("respondent id must not be blank"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::association::{LinkPlacement, QuestionAssociation};
    use crate::test_support::helpers::{insert_survey, jan, seed_bank, test_db};

    async fn survey_with_links(db: &canvass_db::CanvassDb, n: usize) -> (String, Vec<String>) {
        let survey = insert_survey(db).await;
        let bank = seed_bank(db, n).await;
        let assoc = QuestionAssociation::new(db);
        let mut links = Vec::new();
        for (i, entry) in bank.iter().enumerate() {
            let position = u32::try_from(i + 1).unwrap();
            let link = assoc
                .attach_bank_question(&survey.id, &entry.id, LinkPlacement::at(position))
                .await
                .unwrap();
            links.push(link.id);
        }
        (survey.id, links)
    }

    fn submission(survey_id: &str, links: &[String], respondent: &str) -> SessionSubmission {
        SessionSubmission {
            survey_id: survey_id.into(),
            started_at: jan(10),
            feedback: Some("Nice survey".into()),
            answers: links
                .iter()
                .map(|link_id| SubmittedAnswer {
                    link_id: link_id.clone(),
                    respondent_id: respondent.into(),
                    value: "4".into(),
                    answered_at: None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn empty_batch_is_a_noop() {
        let db = test_db().await;
        let (survey_id, _) = survey_with_links(&db, 1).await;
        let receipt = ParticipationRecorder::new(&db)
            .record_session(submission(&survey_id, &[], "user-7"))
            .await
            .unwrap();
        assert_eq!(receipt.recorded, 0);
        assert_eq!(receipt.session_ended_at, None);
        assert!(db.list_answers_for_survey(&survey_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn batch_shares_session_end_and_feedback() {
        let db = test_db().await;
        let (survey_id, links) = survey_with_links(&db, 3).await;
        let now = jan(10) + Duration::minutes(5);
        let mut sub = submission(&survey_id, &links, "user-7");
        sub.answers[0].answered_at = Some(jan(10) + Duration::minutes(1));

        let receipt = ParticipationRecorder::new(&db)
            .record_session_at(sub, now)
            .await
            .unwrap();
        assert_eq!(receipt.recorded, 3);
        assert_eq!(receipt.session_ended_at, Some(now));

        let stored = db.list_answers_for_survey(&survey_id).await.unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|a| a.session_ended_at == now));
        assert!(stored.iter().all(|a| a.session_started_at == jan(10)));
        assert!(stored.iter().all(|a| a.feedback.as_deref() == Some("Nice survey")));
        let answered: Vec<_> = stored.iter().map(|a| a.answered_at).collect();
        assert_eq!(
            answered,
            vec![jan(10) + Duration::minutes(1), now, now]
        );
    }

    #[tokio::test]
    async fn second_session_is_rejected() {
        let db = test_db().await;
        let (survey_id, links) = survey_with_links(&db, 2).await;
        let recorder = ParticipationRecorder::new(&db);
        recorder
            .record_session(submission(&survey_id, &links, "user-7"))
            .await
            .unwrap();

        let err = recorder
            .record_session(submission(&survey_id, &links, "user-7"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(db.list_answers_for_survey(&survey_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn mixed_respondents_and_foreign_links_are_rejected() {
        let db = test_db().await;
        let (survey_id, links) = survey_with_links(&db, 2).await;
        let (_, other_links) = survey_with_links(&db, 1).await;
        let recorder = ParticipationRecorder::new(&db);

        let mut mixed = submission(&survey_id, &links, "user-7");
        mixed.answers[1].respondent_id = "user-8".into();
        assert!(recorder.record_session(mixed).await.unwrap_err().is_validation());

        let foreign = submission(&survey_id, &other_links, "user-7");
        assert!(recorder.record_session(foreign).await.unwrap_err().is_validation());

        let twice = submission(&survey_id, &[links[0].clone(), links[0].clone()], "user-7");
        assert!(recorder.record_session(twice).await.unwrap_err().is_validation());

        let blank = submission(&survey_id, &links, "  ");
        assert!(recorder.record_session(blank).await.unwrap_err().is_validation());

        let missing = submission("svy-ffffffff", &links, "user-7");
        assert!(recorder.record_session(missing).await.unwrap_err().is_not_found());

        assert!(db.list_answers_for_survey(&survey_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mid_batch_store_failure_writes_nothing() {
        let db = test_db().await;
        let (survey_id, links) = survey_with_links(&db, 3).await;
        db.conn()
            .execute(
                "CREATE TRIGGER fail_second_answer BEFORE INSERT ON answers
                 WHEN (SELECT COUNT(*) FROM answers) >= 1
                 BEGIN SELECT RAISE(ABORT, 'simulated failure'); END",
                (),
            )
            .await
            .unwrap();

        let err = ParticipationRecorder::new(&db)
            .record_session(submission(&survey_id, &links, "user-7"))
            .await
            .unwrap_err();
        assert!(matches!(err, SurveyError::Store(_)));
        assert!(db.list_answers_for_survey(&survey_id).await.unwrap().is_empty());
        assert!(!db.has_responded("user-7", &survey_id).await.unwrap());
    }

    #[tokio::test]
    async fn answers_are_read_back_in_link_order() {
        let db = test_db().await;
        let (survey_id, links) = survey_with_links(&db, 3).await;
        let recorder = ParticipationRecorder::new(&db);
        let mut sub = submission(&survey_id, &links, "user-7");
        sub.answers.reverse();
        recorder.record_session(sub).await.unwrap();
        recorder
            .record_session(submission(&survey_id, &links[..1], "user-8"))
            .await
            .unwrap();

        let mine = recorder.answers_for(" user-7 ", &survey_id).await.unwrap();
        let order: Vec<_> = mine.iter().map(|a| a.link_id.clone()).collect();
        assert_eq!(order, links);

        assert_eq!(recorder.answers_for_survey(&survey_id).await.unwrap().len(), 4);
        assert_eq!(recorder.answers_for_link(&links[0]).await.unwrap().len(), 2);
        assert_eq!(recorder.answers_for_link(&links[2]).await.unwrap().len(), 1);

        assert!(recorder.answers_for("", &survey_id).await.unwrap_err().is_validation());
        assert!(
            recorder
                .answers_for("user-7", "svy-ffffffff")
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            recorder
                .answers_for_link("lnk-ffffffff")
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn reset_allows_the_respondent_to_answer_again() {
        let db = test_db().await;
        let (survey_id, links) = survey_with_links(&db, 2).await;
        let recorder = ParticipationRecorder::new(&db);
        recorder
            .record_session(submission(&survey_id, &links, "user-7"))
            .await
            .unwrap();
        recorder
            .record_session(submission(&survey_id, &links, "user-8"))
            .await
            .unwrap();

        assert_eq!(recorder.reset_session("user-7", &survey_id).await.unwrap(), 2);
        assert!(recorder.answers_for("user-7", &survey_id).await.unwrap().is_empty());
        assert_eq!(recorder.answers_for("user-8", &survey_id).await.unwrap().len(), 2);
        assert_eq!(recorder.reset_session("user-7", &survey_id).await.unwrap(), 0);

        let receipt = recorder
            .record_session(submission(&survey_id, &links, "user-7"))
            .await
            .unwrap();
        assert_eq!(receipt.recorded, 2);

        assert!(
            recorder
                .reset_session("user-7", "svy-ffffffff")
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(recorder.reset_session(" ", &survey_id).await.unwrap_err().is_validation());
    }
}
