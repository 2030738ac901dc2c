//! Question association: attaching bank or inline questions to a survey,
//! keeping positions unique and the link count within the survey size.

use serde::{Deserialize, Serialize};

use canvass_core::SURVEY_QUESTION_COUNT;
use canvass_core::entities::{NewLink, QuestionSource, SurveyQuestionLink};
use canvass_core::errors::SurveyError;
use canvass_core::repos::{LinkRepo, QuestionBankRepo, SurveyRepo};
use canvass_core::responses::LinkDetail;

use crate::listing::find_link_by_position;

/// Where a new link goes and whether it is a discard question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPlacement {
    pub position: u32,
    #[serde(default)]
    pub is_discard: bool,
    #[serde(default)]
    pub discard_criterion: Option<String>,
}

impl LinkPlacement {
    /// A plain (non-discard) link at `position`.
    #[must_use]
    pub fn at(position: u32) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// A one-off question authored directly on a survey. Type and
/// classification are given by catalog name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineQuestionInput {
    pub text: String,
    pub type_name: String,
    #[serde(default)]
    pub classification_name: Option<String>,
}

/// Blank criteria are kept out of storage. Flagging a discard question
/// without one is allowed but logged.
fn normalize_criterion(link_ref: &str, is_discard: bool, criterion: Option<&str>) -> Option<String> {
    let trimmed = criterion.map(str::trim).filter(|c| !c.is_empty());
    if is_discard && trimmed.is_none() {
        tracing::warn!(link = link_ref, "discard question has no criterion");
    }
    trimmed.map(String::from)
}

pub struct QuestionAssociation<'a, S> {
    store: &'a S,
}

impl<'a, S> QuestionAssociation<'a, S>
where
    S: SurveyRepo + LinkRepo + QuestionBankRepo,
{
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Survey exists, has room for one more link, and `position` is free.
    async fn check_room(&self, survey_id: &str, position: u32) -> Result<(), SurveyError> {
        if self.store.get_survey(survey_id).await?.is_none() {
            return Err(SurveyError::not_found("survey", survey_id));
        }
        let links = self.store.list_links_for_survey(survey_id).await?;
        if links.len() >= SURVEY_QUESTION_COUNT {
            return Err(SurveyError::validation(format!(
                "survey {survey_id} already has {SURVEY_QUESTION_COUNT} questions"
            )));
        }
        Self::check_position(survey_id, &links, position, None)
    }

    fn check_position(
        survey_id: &str,
        links: &[SurveyQuestionLink],
        position: u32,
        moving: Option<&str>,
    ) -> Result<(), SurveyError> {
        if position == 0 {
            return Err(SurveyError::validation("position must be 1 or greater"));
        }
        match find_link_by_position(links, position) {
            Some(taken) if Some(taken.id.as_str()) != moving => Err(SurveyError::validation(
                format!("position {position} is already used in survey {survey_id}"),
            )),
            _ => Ok(()),
        }
    }

    /// Attach an existing bank question to a survey.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing survey or bank question, `Validation` when
    /// the survey is full or the position is invalid or taken.
    pub async fn attach_bank_question(
        &self,
        survey_id: &str,
        bank_question_id: &str,
        placement: LinkPlacement,
    ) -> Result<SurveyQuestionLink, SurveyError> {
        self.check_room(survey_id, placement.position).await?;
        if self
            .store
            .get_bank_question(bank_question_id)
            .await?
            .is_none()
        {
            return Err(SurveyError::not_found("bank question", bank_question_id));
        }

        let discard_criterion = normalize_criterion(
            bank_question_id,
            placement.is_discard,
            placement.discard_criterion.as_deref(),
        );
        let link = self
            .store
            .insert_link(&NewLink {
                survey_id: survey_id.to_string(),
                source: QuestionSource::Bank {
                    question_id: bank_question_id.to_string(),
                },
                position: placement.position,
                is_discard: placement.is_discard,
                discard_criterion,
            })
            .await?;
        tracing::debug!(survey_id, link_id = %link.id, position = link.position, "attached bank question");
        Ok(link)
    }

    /// Attach a one-off question. The type name must resolve; an unknown
    /// classification name is dropped.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing survey, `Validation` for blank text, an
    /// unknown type, a full survey, or a bad position.
    pub async fn attach_inline_question(
        &self,
        survey_id: &str,
        input: InlineQuestionInput,
        placement: LinkPlacement,
    ) -> Result<SurveyQuestionLink, SurveyError> {
        self.check_room(survey_id, placement.position).await?;

        let text = input.text.trim();
        if text.is_empty() {
            return Err(SurveyError::validation("question text must not be blank"));
        }
        let Some(question_type) = self
            .store
            .find_question_type_by_name(&input.type_name)
            .await?
        else {
            return Err(SurveyError::validation(format!(
                "unknown question type '{}'",
                input.type_name.trim()
            )));
        };
        let classification_id = match input.classification_name.as_deref() {
            Some(name) if !name.trim().is_empty() => {
                let found = self.store.find_classification_by_name(name).await?;
                if found.is_none() {
                    tracing::warn!(survey_id, classification = name, "unknown classification ignored");
                }
                found.map(|c| c.id)
            }
            _ => None,
        };

        let discard_criterion = normalize_criterion(
            text,
            placement.is_discard,
            placement.discard_criterion.as_deref(),
        );
        let link = self
            .store
            .insert_link(&NewLink {
                survey_id: survey_id.to_string(),
                source: QuestionSource::Inline {
                    text: text.to_string(),
                    type_id: question_type.id,
                    classification_id,
                },
                position: placement.position,
                is_discard: placement.is_discard,
                discard_criterion,
            })
            .await?;
        tracing::debug!(survey_id, link_id = %link.id, position = link.position, "attached inline question");
        Ok(link)
    }

    async fn require_link(&self, link_id: &str) -> Result<SurveyQuestionLink, SurveyError> {
        self.store
            .get_link(link_id)
            .await?
            .ok_or_else(|| SurveyError::not_found("link", link_id))
    }

    async fn save_link(&self, link: &SurveyQuestionLink) -> Result<(), SurveyError> {
        if self.store.update_link(link).await? {
            Ok(())
        } else {
            Err(SurveyError::not_found("link", &link.id))
        }
    }

    /// Flag a link as a discard question.
    ///
    /// # Errors
    ///
    /// `NotFound` if the link does not exist.
    pub async fn mark_discard(
        &self,
        link_id: &str,
        criterion: &str,
    ) -> Result<SurveyQuestionLink, SurveyError> {
        let mut link = self.require_link(link_id).await?;
        link.is_discard = true;
        link.discard_criterion = normalize_criterion(link_id, true, Some(criterion));
        self.save_link(&link).await?;
        Ok(link)
    }

    /// Clear the discard flag and its criterion.
    ///
    /// # Errors
    ///
    /// `NotFound` if the link does not exist.
    pub async fn unmark_discard(&self, link_id: &str) -> Result<SurveyQuestionLink, SurveyError> {
        let mut link = self.require_link(link_id).await?;
        link.is_discard = false;
        link.discard_criterion = None;
        self.save_link(&link).await?;
        Ok(link)
    }

    /// Move a link to another free position in its survey.
    ///
    /// # Errors
    ///
    /// `NotFound` if the link does not exist, `Validation` if the position
    /// is zero or held by another link.
    pub async fn move_link(
        &self,
        link_id: &str,
        new_position: u32,
    ) -> Result<SurveyQuestionLink, SurveyError> {
        let mut link = self.require_link(link_id).await?;
        let siblings = self.store.list_links_for_survey(&link.survey_id).await?;
        Self::check_position(&link.survey_id, &siblings, new_position, Some(link_id))?;

        link.position = new_position;
        self.save_link(&link).await?;
        Ok(link)
    }

    /// Delete a link along with any answers recorded against it.
    ///
    /// # Errors
    ///
    /// `NotFound` if no link was deleted.
    pub async fn remove_link(&self, link_id: &str) -> Result<(), SurveyError> {
        if self.store.delete_link(link_id).await? {
            tracing::debug!(link_id, "removed link");
            Ok(())
        } else {
            Err(SurveyError::not_found("link", link_id))
        }
    }

    /// Remove every link of a survey. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Store` if the delete fails.
    pub async fn remove_all_links(&self, survey_id: &str) -> Result<u64, SurveyError> {
        Ok(self.store.delete_links_for_survey(survey_id).await?)
    }

    /// Links of a survey ordered by position.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Store` if the lookup fails.
    pub async fn links(&self, survey_id: &str) -> Result<Vec<SurveyQuestionLink>, SurveyError> {
        Ok(self.store.list_links_for_survey(survey_id).await?)
    }

    /// Links of a survey with text, type name, and classification name
    /// resolved from the bank or the inline fields.
    ///
    /// # Errors
    ///
    /// `NotFound` if a bank link points at a missing bank question.
    pub async fn link_details(&self, survey_id: &str) -> Result<Vec<LinkDetail>, SurveyError> {
        let links = self.links(survey_id).await?;
        let mut details = Vec::with_capacity(links.len());
        for link in links {
            details.push(self.resolve(link).await?);
        }
        Ok(details)
    }

    async fn resolve(&self, link: SurveyQuestionLink) -> Result<LinkDetail, SurveyError> {
        let (text, type_id, classification_id) = match &link.source {
            QuestionSource::Bank { question_id } => {
                let entry = self
                    .store
                    .get_bank_question(question_id)
                    .await?
                    .ok_or_else(|| SurveyError::not_found("bank question", question_id.as_str()))?;
                (entry.text, entry.type_id, entry.classification_id)
            }
            QuestionSource::Inline {
                text,
                type_id,
                classification_id,
            } => (text.clone(), type_id.clone(), classification_id.clone()),
        };

        let type_name = self
            .store
            .get_question_type(&type_id)
            .await?
            .map(|t| t.name);
        let classification_name = match classification_id {
            Some(id) => self.store.get_classification(&id).await?.map(|c| c.name),
            None => None,
        };

        Ok(LinkDetail {
            link,
            text,
            type_name,
            classification_name,
        })
    }

    /// The link at `position`, if any.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Store` if the lookup fails.
    pub async fn link_at_position(
        &self,
        survey_id: &str,
        position: u32,
    ) -> Result<Option<SurveyQuestionLink>, SurveyError> {
        let links = self.links(survey_id).await?;
        Ok(find_link_by_position(&links, position).cloned())
    }
}
