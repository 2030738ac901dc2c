//! Response answers. A session's answers are written in one transaction.

use canvass_core::entities::{NewAnswer, ResponseAnswer};
use canvass_core::ids::PREFIX_ANSWER;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::{CanvassDb, generate_id_on};

const SELECT_COLS: &str = "id, link_id, respondent_id, value, answered_at, \
                           session_started_at, session_ended_at, feedback";

fn row_to_answer(row: &libsql::Row) -> Result<ResponseAnswer, DatabaseError> {
    Ok(ResponseAnswer {
        id: row.get(0)?,
        link_id: row.get(1)?,
        respondent_id: row.get(2)?,
        value: row.get(3)?,
        answered_at: parse_datetime(&row.get::<String>(4)?)?,
        session_started_at: parse_datetime(&row.get::<String>(5)?)?,
        session_ended_at: parse_datetime(&row.get::<String>(6)?)?,
        feedback: get_opt_string(row, 7)?,
    })
}

async fn insert_answer(
    conn: &libsql::Connection,
    answer: &NewAnswer,
) -> Result<ResponseAnswer, DatabaseError> {
    let id = generate_id_on(conn, PREFIX_ANSWER).await?;
    conn.execute(
        &format!(
            "INSERT INTO answers ({SELECT_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        ),
        libsql::params![
            id.as_str(),
            answer.link_id.as_str(),
            answer.respondent_id.as_str(),
            answer.value.as_str(),
            answer.answered_at.to_rfc3339(),
            answer.session_started_at.to_rfc3339(),
            answer.session_ended_at.to_rfc3339(),
            answer.feedback.as_deref()
        ],
    )
    .await?;

    Ok(ResponseAnswer {
        id,
        link_id: answer.link_id.clone(),
        respondent_id: answer.respondent_id.clone(),
        value: answer.value.clone(),
        answered_at: answer.answered_at,
        session_started_at: answer.session_started_at,
        session_ended_at: answer.session_ended_at,
        feedback: answer.feedback.clone(),
    })
}

impl CanvassDb {
    /// Insert every answer or none. Any failure rolls the whole batch back.
    pub async fn insert_answers_atomic(
        &self,
        answers: &[NewAnswer],
    ) -> Result<Vec<ResponseAnswer>, DatabaseError> {
        let tx = self.conn().transaction().await?;
        let mut stored = Vec::with_capacity(answers.len());

        for answer in answers {
            match insert_answer(&tx, answer).await {
                Ok(row) => stored.push(row),
                Err(err) => {
                    tracing::warn!(link_id = %answer.link_id, error = %err, "answer insert failed, rolling back batch");
                    if let Err(rollback_err) = tx.rollback().await {
                        tracing::warn!(error = %rollback_err, "rollback failed");
                    }
                    return Err(err);
                }
            }
        }

        tx.commit().await?;
        tracing::debug!(count = stored.len(), "committed answer batch");
        Ok(stored)
    }

    /// Whether any answer joins this respondent to a link of this survey.
    pub async fn has_responded(
        &self,
        respondent_id: &str,
        survey_id: &str,
    ) -> Result<bool, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT EXISTS (
                     SELECT 1 FROM answers a
                     JOIN survey_questions q ON q.id = a.link_id
                     WHERE a.respondent_id = ?1 AND q.survey_id = ?2
                 )",
                [respondent_id, survey_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)? != 0)
    }

    pub async fn list_answers_for_survey(
        &self,
        survey_id: &str,
    ) -> Result<Vec<ResponseAnswer>, DatabaseError> {
        self.query_answers(
            "WHERE q.survey_id = ?1 ORDER BY a.respondent_id, q.position",
            &[survey_id],
        )
        .await
    }

    pub async fn list_answers_for_respondent(
        &self,
        respondent_id: &str,
        survey_id: &str,
    ) -> Result<Vec<ResponseAnswer>, DatabaseError> {
        self.query_answers(
            "WHERE a.respondent_id = ?1 AND q.survey_id = ?2 ORDER BY q.position, a.id",
            &[respondent_id, survey_id],
        )
        .await
    }

    pub async fn list_answers_for_link(
        &self,
        link_id: &str,
    ) -> Result<Vec<ResponseAnswer>, DatabaseError> {
        self.query_answers(
            "WHERE a.link_id = ?1 ORDER BY a.answered_at, a.id",
            &[link_id],
        )
        .await
    }

    pub async fn delete_answers_for_respondent(
        &self,
        respondent_id: &str,
        survey_id: &str,
    ) -> Result<u64, DatabaseError> {
        let removed = self
            .conn()
            .execute(
                "DELETE FROM answers
                 WHERE respondent_id = ?1
                   AND link_id IN (SELECT id FROM survey_questions WHERE survey_id = ?2)",
                [respondent_id, survey_id],
            )
            .await?;
        Ok(removed)
    }

    async fn query_answers(
        &self,
        filter: &str,
        params: &[&str],
    ) -> Result<Vec<ResponseAnswer>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT a.id, a.link_id, a.respondent_id, a.value, a.answered_at,
                            a.session_started_at, a.session_ended_at, a.feedback
                     FROM answers a
                     JOIN survey_questions q ON q.id = a.link_id
                     {filter}"
                ),
                libsql::params_from_iter(params.iter().copied().map(libsql::Value::from)),
            )
            .await?;
        let mut answers = Vec::new();
        while let Some(row) = rows.next().await? {
            answers.push(row_to_answer(&row)?);
        }
        Ok(answers)
    }
}
