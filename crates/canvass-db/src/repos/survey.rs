//! Survey repository: CRUD and state updates.

use canvass_core::entities::{NewSurvey, Survey};
use canvass_core::enums::SurveyState;
use canvass_core::ids::PREFIX_SURVEY;

use crate::CanvassDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u32, parse_datetime};

const SELECT_COLS: &str = "id, name, description, starts_at, ends_at, audience_size, \
                           profile_definition, state, created_at, admin_id";

fn row_to_survey(row: &libsql::Row) -> Result<Survey, DatabaseError> {
    Ok(Survey {
        id: row.get(0)?,
        name: row.get(1)?,
        description: get_opt_string(row, 2)?,
        starts_at: parse_datetime(&row.get::<String>(3)?)?,
        ends_at: parse_datetime(&row.get::<String>(4)?)?,
        audience_size: get_u32(row, 5)?,
        profile_definition: get_opt_string(row, 6)?,
        state: SurveyState::parse(&row.get::<String>(7)?),
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        admin_id: row.get(9)?,
    })
}

impl CanvassDb {
    pub async fn insert_survey(&self, survey: &NewSurvey) -> Result<Survey, DatabaseError> {
        let id = self.generate_id(PREFIX_SURVEY).await?;

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO surveys ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
                ),
                libsql::params![
                    id.as_str(),
                    survey.name.as_str(),
                    survey.description.as_deref(),
                    survey.starts_at.to_rfc3339(),
                    survey.ends_at.to_rfc3339(),
                    i64::from(survey.audience_size),
                    survey.profile_definition.as_deref(),
                    survey.state.as_str(),
                    survey.created_at.to_rfc3339(),
                    survey.admin_id.as_str()
                ],
            )
            .await?;

        tracing::debug!(survey_id = %id, "inserted survey");
        Ok(Survey {
            id,
            name: survey.name.clone(),
            description: survey.description.clone(),
            starts_at: survey.starts_at,
            ends_at: survey.ends_at,
            audience_size: survey.audience_size,
            profile_definition: survey.profile_definition.clone(),
            state: survey.state.clone(),
            created_at: survey.created_at,
            admin_id: survey.admin_id.clone(),
        })
    }

    pub async fn get_survey(&self, id: &str) -> Result<Option<Survey>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM surveys WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_survey(&row)?)),
            None => Ok(None),
        }
    }

    /// Overwrite the editable metadata columns. State, `created_at`, and
    /// `admin_id` are left alone.
    pub async fn update_survey(&self, survey: &Survey) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE surveys
                 SET name = ?1, description = ?2, starts_at = ?3, ends_at = ?4,
                     audience_size = ?5, profile_definition = ?6
                 WHERE id = ?7",
                libsql::params![
                    survey.name.as_str(),
                    survey.description.as_deref(),
                    survey.starts_at.to_rfc3339(),
                    survey.ends_at.to_rfc3339(),
                    i64::from(survey.audience_size),
                    survey.profile_definition.as_deref(),
                    survey.id.as_str()
                ],
            )
            .await?;
        Ok(changed > 0)
    }

    pub async fn update_survey_state(
        &self,
        id: &str,
        state: &SurveyState,
    ) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE surveys SET state = ?1 WHERE id = ?2",
                [state.as_str(), id],
            )
            .await?;
        Ok(changed > 0)
    }

    pub async fn delete_survey(&self, id: &str) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute("DELETE FROM surveys WHERE id = ?1", [id])
            .await?;
        Ok(changed > 0)
    }

    pub async fn list_surveys(&self) -> Result<Vec<Survey>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM surveys ORDER BY created_at, id"),
                (),
            )
            .await?;
        let mut surveys = Vec::new();
        while let Some(row) = rows.next().await? {
            surveys.push(row_to_survey(&row)?);
        }
        Ok(surveys)
    }

    /// Surveys in the given state. Matching is case-insensitive so legacy
    /// rows (`Activa`) are found alongside current ones.
    pub async fn list_surveys_by_state(
        &self,
        state: &SurveyState,
    ) -> Result<Vec<Survey>, DatabaseError> {
        let surveys = self.list_surveys().await?;
        Ok(surveys.into_iter().filter(|s| &s.state == state).collect())
    }
}
