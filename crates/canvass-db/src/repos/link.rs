//! Survey question links: the ordered, capped set of questions in a survey.
//!
//! A link row carries either a bank question reference or the inline
//! question columns, never both (enforced by a CHECK constraint).

use canvass_core::entities::{NewLink, QuestionSource, SurveyQuestionLink};
use canvass_core::ids::PREFIX_LINK;

use crate::CanvassDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u32};

const SELECT_COLS: &str = "id, survey_id, bank_question_id, inline_text, inline_type_id, \
                           inline_classification_id, position, is_discard, discard_criterion";

fn row_to_link(row: &libsql::Row) -> Result<SurveyQuestionLink, DatabaseError> {
    let id: String = row.get(0)?;
    let source = match get_opt_string(row, 2)? {
        Some(question_id) => QuestionSource::Bank { question_id },
        None => {
            let (Some(text), Some(type_id)) = (get_opt_string(row, 3)?, get_opt_string(row, 4)?)
            else {
                return Err(DatabaseError::InvalidState(format!(
                    "link {id} has neither a bank question nor inline text"
                )));
            };
            QuestionSource::Inline {
                text,
                type_id,
                classification_id: get_opt_string(row, 5)?,
            }
        }
    };
    Ok(SurveyQuestionLink {
        id,
        survey_id: row.get(1)?,
        source,
        position: get_u32(row, 6)?,
        is_discard: row.get::<i64>(7)? != 0,
        discard_criterion: get_opt_string(row, 8)?,
    })
}

impl CanvassDb {
    pub async fn insert_link(&self, link: &NewLink) -> Result<SurveyQuestionLink, DatabaseError> {
        let id = self.generate_id(PREFIX_LINK).await?;

        let (bank_question_id, inline_text, inline_type_id, inline_classification_id) =
            match &link.source {
                QuestionSource::Bank { question_id } => (Some(question_id.as_str()), None, None, None),
                QuestionSource::Inline {
                    text,
                    type_id,
                    classification_id,
                } => (
                    None,
                    Some(text.as_str()),
                    Some(type_id.as_str()),
                    classification_id.as_deref(),
                ),
            };

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO survey_questions ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    link.survey_id.as_str(),
                    bank_question_id,
                    inline_text,
                    inline_type_id,
                    inline_classification_id,
                    i64::from(link.position),
                    i64::from(link.is_discard),
                    link.discard_criterion.as_deref()
                ],
            )
            .await?;

        tracing::debug!(link_id = %id, survey_id = %link.survey_id, position = link.position, "inserted link");
        Ok(SurveyQuestionLink {
            id,
            survey_id: link.survey_id.clone(),
            source: link.source.clone(),
            position: link.position,
            is_discard: link.is_discard,
            discard_criterion: link.discard_criterion.clone(),
        })
    }

    pub async fn get_link(&self, id: &str) -> Result<Option<SurveyQuestionLink>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM survey_questions WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_link(&row)?)),
            None => Ok(None),
        }
    }

    /// Overwrite position and discard metadata. The question source of a
    /// link is fixed once created.
    pub async fn update_link(&self, link: &SurveyQuestionLink) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE survey_questions
                 SET position = ?1, is_discard = ?2, discard_criterion = ?3
                 WHERE id = ?4",
                libsql::params![
                    i64::from(link.position),
                    i64::from(link.is_discard),
                    link.discard_criterion.as_deref(),
                    link.id.as_str()
                ],
            )
            .await?;
        Ok(changed > 0)
    }

    /// Delete one link and the answers recorded against it.
    pub async fn delete_link(&self, id: &str) -> Result<bool, DatabaseError> {
        let (answers, links) = self
            .delete_with_answers(
                "DELETE FROM answers WHERE link_id = ?1",
                "DELETE FROM survey_questions WHERE id = ?1",
                id,
            )
            .await?;
        tracing::debug!(link_id = id, answers_removed = answers, "deleted link");
        Ok(links > 0)
    }

    /// Delete every link of a survey together with their answers. Returns
    /// the number of links removed.
    pub async fn delete_links_for_survey(&self, survey_id: &str) -> Result<u64, DatabaseError> {
        let (answers, links) = self
            .delete_with_answers(
                "DELETE FROM answers WHERE link_id IN
                     (SELECT id FROM survey_questions WHERE survey_id = ?1)",
                "DELETE FROM survey_questions WHERE survey_id = ?1",
                survey_id,
            )
            .await?;
        tracing::debug!(
            survey_id,
            links_removed = links,
            answers_removed = answers,
            "deleted survey links"
        );
        Ok(links)
    }

    /// Run an answer delete and then a link delete in one transaction.
    async fn delete_with_answers(
        &self,
        answers_sql: &str,
        links_sql: &str,
        key: &str,
    ) -> Result<(u64, u64), DatabaseError> {
        let tx = self.conn().transaction().await?;
        let outcome = async {
            let answers = tx.execute(answers_sql, [key]).await?;
            let links = tx.execute(links_sql, [key]).await?;
            Ok::<_, DatabaseError>((answers, links))
        }
        .await;

        match outcome {
            Ok(counts) => {
                tx.commit().await?;
                Ok(counts)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    pub async fn list_links_for_survey(
        &self,
        survey_id: &str,
    ) -> Result<Vec<SurveyQuestionLink>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM survey_questions
                     WHERE survey_id = ?1 ORDER BY position"
                ),
                [survey_id],
            )
            .await?;
        let mut links = Vec::new();
        while let Some(row) = rows.next().await? {
            links.push(row_to_link(&row)?);
        }
        Ok(links)
    }

    pub async fn count_links_for_survey(&self, survey_id: &str) -> Result<u64, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT COUNT(*) FROM survey_questions WHERE survey_id = ?1",
                [survey_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count)
            .map_err(|_| DatabaseError::InvalidState(format!("negative link count {count}")))
    }
}
