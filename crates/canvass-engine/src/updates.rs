//! Survey metadata update builder.
//!
//! Every field is optional: `None` leaves the stored value alone. Nullable
//! columns use `Option<Option<_>>` so callers can clear them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_definition: Option<Option<String>>,
}

impl SurveyUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.starts_at.is_none()
            && self.ends_at.is_none()
            && self.audience_size.is_none()
            && self.profile_definition.is_none()
    }
}

#[derive(Debug, Default)]
pub struct SurveyUpdateBuilder(SurveyUpdate);

impl SurveyUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SurveyUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn starts_at(mut self, starts_at: DateTime<Utc>) -> Self {
        self.0.starts_at = Some(starts_at);
        self
    }

    #[must_use]
    pub fn ends_at(mut self, ends_at: DateTime<Utc>) -> Self {
        self.0.ends_at = Some(ends_at);
        self
    }

    #[must_use]
    pub fn audience_size(mut self, audience_size: i64) -> Self {
        self.0.audience_size = Some(audience_size);
        self
    }

    #[must_use]
    pub fn profile_definition(mut self, profile_definition: Option<String>) -> Self {
        self.0.profile_definition = Some(profile_definition);
        self
    }

    #[must_use]
    pub fn build(self) -> SurveyUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_builds_empty_update() {
        assert!(SurveyUpdateBuilder::new().build().is_empty());
    }

    #[test]
    fn clearing_a_field_is_not_empty() {
        let update = SurveyUpdateBuilder::new().description(None).build();
        assert!(!update.is_empty());
        assert_eq!(update.description, Some(None));
    }

    #[test]
    fn serializes_only_present_fields() {
        let update = SurveyUpdateBuilder::new()
            .name("Renamed")
            .audience_size(5)
            .build();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Renamed", "audience_size": 5}));
    }
}
