//! Survey lifecycle: creation, metadata edits, state changes, deletion,
//! copying, and the listings built on top of them.
//!
//! Only the move into `active` is gated:
//!
//! ```text
//! draft ──activate──▶ active ──▶ closed
//!         (12 links, profile, not ended)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use canvass_config::SurveyRulesConfig;
use canvass_core::SURVEY_QUESTION_COUNT;
use canvass_core::entities::{NewSurvey, Survey};
use canvass_core::enums::SurveyState;
use canvass_core::errors::SurveyError;
use canvass_core::repos::{AnswerRepo, LinkRepo, QuestionBankRepo, SurveyRepo};
use canvass_core::responses::{CopyOutcome, SurveyDeletion, SurveyDetails, UpdateOutcome};

use crate::association::QuestionAssociation;
use crate::guard::ResponseGuard;
use crate::listing::sort_by_name;
use crate::updates::SurveyUpdate;

/// Input for a new survey. Timestamps are optional so missing values are
/// reported as validation errors rather than parse failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub audience_size: i64,
    #[serde(default)]
    pub profile_definition: Option<String>,
    pub admin_id: String,
}

fn audience(value: i64) -> Result<u32, SurveyError> {
    if value < 0 {
        return Err(SurveyError::validation(format!(
            "audience size must be non-negative, got {value}"
        )));
    }
    u32::try_from(value).map_err(|_| {
        SurveyError::validation(format!("audience size {value} exceeds {}", u32::MAX))
    })
}

fn check_window(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<(), SurveyError> {
    if ends_at < starts_at {
        return Err(SurveyError::validation(format!(
            "end {} is before start {}",
            ends_at.to_rfc3339(),
            starts_at.to_rfc3339()
        )));
    }
    Ok(())
}

/// Empty and whitespace-only text becomes `None`.
fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

pub struct SurveyLifecycle<'a, S> {
    store: &'a S,
    rules: &'a SurveyRulesConfig,
}

impl<'a, S> SurveyLifecycle<'a, S>
where
    S: SurveyRepo + LinkRepo + QuestionBankRepo + AnswerRepo,
{
    pub const fn new(store: &'a S, rules: &'a SurveyRulesConfig) -> Self {
        Self { store, rules }
    }

    async fn require(&self, id: &str) -> Result<Survey, SurveyError> {
        self.store
            .get_survey(id)
            .await?
            .ok_or_else(|| SurveyError::not_found("survey", id))
    }

    /// Validate and persist a new survey in `draft`.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank name or admin, a missing timestamp, an end
    /// before the start, or a negative audience. Nothing is written then.
    pub async fn create_survey(&self, draft: SurveyDraft) -> Result<Survey, SurveyError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(SurveyError::validation("survey name must not be blank"));
        }
        let admin_id = draft.admin_id.trim();
        if admin_id.is_empty() {
            return Err(SurveyError::validation("admin id must not be blank"));
        }
        let (Some(starts_at), Some(ends_at)) = (draft.starts_at, draft.ends_at) else {
            return Err(SurveyError::validation(
                "survey needs both a start and an end timestamp",
            ));
        };
        check_window(starts_at, ends_at)?;
        let audience_size = audience(draft.audience_size)?;

        let survey = self
            .store
            .insert_survey(&NewSurvey {
                name: name.to_string(),
                description: non_blank(draft.description),
                starts_at,
                ends_at,
                audience_size,
                profile_definition: draft.profile_definition,
                state: SurveyState::Draft,
                created_at: Utc::now(),
                admin_id: admin_id.to_string(),
            })
            .await?;
        tracing::debug!(survey_id = %survey.id, name = %survey.name, "created survey");
        Ok(survey)
    }

    /// Apply the fields of `update` that are present and differ from the
    /// stored survey. A blank name is ignored. Writes only when something
    /// changed.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing survey, `Validation` for a negative audience
    /// or a merged window whose end precedes its start.
    pub async fn modify_metadata(
        &self,
        id: &str,
        update: SurveyUpdate,
    ) -> Result<UpdateOutcome, SurveyError> {
        let current = self.require(id).await?;
        let mut merged = current.clone();

        if let Some(name) = update.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                merged.name = name.to_string();
            }
        }
        if let Some(description) = update.description {
            merged.description = non_blank(description);
        }
        if let Some(starts_at) = update.starts_at {
            merged.starts_at = starts_at;
        }
        if let Some(ends_at) = update.ends_at {
            merged.ends_at = ends_at;
        }
        if let Some(size) = update.audience_size {
            merged.audience_size = audience(size)?;
        }
        if let Some(profile) = update.profile_definition {
            merged.profile_definition = profile;
        }
        check_window(merged.starts_at, merged.ends_at)?;

        if merged == current {
            return Ok(UpdateOutcome {
                survey: current,
                changed: false,
            });
        }
        if !self.store.update_survey(&merged).await? {
            return Err(SurveyError::not_found("survey", id));
        }
        tracing::debug!(survey_id = id, "updated survey metadata");
        Ok(UpdateOutcome {
            survey: merged,
            changed: true,
        })
    }

    /// Move a survey to `target`, checking activation rules against the
    /// current time.
    ///
    /// # Errors
    ///
    /// See [`Self::change_state_at`].
    pub async fn change_state(&self, id: &str, target: SurveyState) -> Result<Survey, SurveyError> {
        self.change_state_at(id, target, Utc::now()).await
    }

    /// Move a survey to `target`. Activation requires exactly
    /// [`SURVEY_QUESTION_COUNT`] links, a non-blank profile, and an end not
    /// before `now`. Every other target is applied as-is.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing survey, `Validation` for a blank label or a
    /// failed activation rule.
    pub async fn change_state_at(
        &self,
        id: &str,
        target: SurveyState,
        now: DateTime<Utc>,
    ) -> Result<Survey, SurveyError> {
        if target.is_blank() {
            return Err(SurveyError::validation("state label must not be blank"));
        }
        let mut survey = self.require(id).await?;

        if target.is_active() {
            let links = self.store.count_links_for_survey(id).await?;
            if usize::try_from(links).ok() != Some(SURVEY_QUESTION_COUNT) {
                return Err(SurveyError::validation(format!(
                    "survey needs exactly {SURVEY_QUESTION_COUNT} questions to activate, has {links}"
                )));
            }
            if !survey.has_profile() {
                return Err(SurveyError::validation(
                    "survey needs a profile definition to activate",
                ));
            }
            if survey.ends_at < now {
                return Err(SurveyError::validation(format!(
                    "survey ended at {} and cannot be activated",
                    survey.ends_at.to_rfc3339()
                )));
            }
        }

        if !self.store.update_survey_state(id, &target).await? {
            return Err(SurveyError::not_found("survey", id));
        }
        tracing::info!(survey_id = id, from = %survey.state, to = %target, "survey state changed");
        survey.state = target;
        Ok(survey)
    }

    /// Shorthand for `change_state(id, SurveyState::Active)`.
    ///
    /// # Errors
    ///
    /// See [`Self::change_state_at`].
    pub async fn activate(&self, id: &str) -> Result<Survey, SurveyError> {
        self.change_state(id, SurveyState::Active).await
    }

    /// Remove a survey's links and their answers, then the survey. A failed
    /// link cascade is logged and reported in the outcome but does not stop
    /// the survey delete from being attempted. With foreign keys enforced the
    /// surviving links then fail that delete.
    ///
    /// # Errors
    ///
    /// `NotFound` if no survey row was deleted, `Store` if the survey delete
    /// itself failed.
    pub async fn delete_survey(&self, id: &str) -> Result<SurveyDeletion, SurveyError> {
        let (links_removed, cascade_error) = match self.store.delete_links_for_survey(id).await {
            Ok(removed) => (removed, None),
            Err(err) => {
                tracing::warn!(survey_id = id, error = %err, "failed to remove survey links");
                (0, Some(err.to_string()))
            }
        };

        if !self.store.delete_survey(id).await? {
            return Err(SurveyError::not_found("survey", id));
        }
        tracing::debug!(survey_id = id, links_removed, "deleted survey");
        Ok(SurveyDeletion {
            survey_id: id.to_string(),
            links_removed,
            cascade_error,
        })
    }

    /// Copy a survey and its links into a new `draft` owned by `admin_id`.
    /// Links that fail to copy are logged and counted, not fatal.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing source, `Validation` for a blank admin id,
    /// `Store` if the source cannot be read or the new survey row cannot be
    /// created.
    pub async fn copy_survey(&self, id: &str, admin_id: &str) -> Result<CopyOutcome, SurveyError> {
        let admin_id = admin_id.trim();
        if admin_id.is_empty() {
            return Err(SurveyError::validation("admin id must not be blank"));
        }
        let source = self.require(id).await?;
        let links = self.store.list_links_for_survey(id).await?;

        let copy = self
            .store
            .insert_survey(&NewSurvey {
                name: self.rules.copy_name(&source.name),
                description: source.description.clone(),
                starts_at: source.starts_at,
                ends_at: source.ends_at,
                audience_size: source.audience_size,
                profile_definition: source.profile_definition.clone(),
                state: SurveyState::Draft,
                created_at: Utc::now(),
                admin_id: admin_id.to_string(),
            })
            .await?;

        let mut links_copied = 0;
        let mut links_failed = 0;
        for link in &links {
            match self.store.insert_link(&link.duplicate_for(&copy.id)).await {
                Ok(_) => links_copied += 1,
                Err(err) => {
                    tracing::warn!(
                        source_link = %link.id,
                        copy_id = %copy.id,
                        error = %err,
                        "failed to copy link"
                    );
                    links_failed += 1;
                }
            }
        }

        tracing::debug!(source_id = id, copy_id = %copy.id, links_copied, links_failed, "copied survey");
        Ok(CopyOutcome {
            survey: copy,
            links_copied,
            links_failed,
        })
    }

    /// # Errors
    ///
    /// `NotFound` for a missing survey.
    pub async fn get_survey(&self, id: &str) -> Result<Survey, SurveyError> {
        self.require(id).await
    }

    /// A survey with its questions resolved, in position order.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing survey or a dangling bank reference.
    pub async fn survey_details(&self, id: &str) -> Result<SurveyDetails, SurveyError> {
        let survey = self.require(id).await?;
        let questions = QuestionAssociation::new(self.store)
            .link_details(id)
            .await?;
        Ok(SurveyDetails { survey, questions })
    }

    /// Every survey, or those in `state`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Store` if the listing fails.
    pub async fn list_surveys_sorted(
        &self,
        state: Option<&SurveyState>,
    ) -> Result<Vec<Survey>, SurveyError> {
        let surveys = match state {
            Some(state) => self.store.list_surveys_by_state(state).await?,
            None => self.store.list_surveys().await?,
        };
        Ok(sort_by_name(&surveys))
    }

    /// Active surveys the respondent has not answered yet.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Store` if a lookup fails.
    pub async fn available_for(&self, respondent_id: &str) -> Result<Vec<Survey>, SurveyError> {
        let guard = ResponseGuard::new(self.store);
        let active = self.store.list_surveys_by_state(&SurveyState::Active).await?;
        let mut available = Vec::with_capacity(active.len());
        for survey in active {
            if !guard.has_responded(respondent_id, &survey.id).await? {
                available.push(survey);
            }
        }
        Ok(available)
    }
}
