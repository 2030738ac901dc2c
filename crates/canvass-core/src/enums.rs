//! Survey lifecycle states and question bank states.
//!
//! `BankQuestionState` uses `snake_case` serialization via
//! `#[serde(rename_all = "snake_case")]`. `SurveyState` is an open set: the
//! three well-known states plus any custom label, serialized as a plain string.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// SurveyState
// ---------------------------------------------------------------------------

/// Lifecycle state of a survey.
///
/// ```text
/// draft → active → closed
/// ```
///
/// Only the transition into `active` is gated (see the lifecycle manager);
/// every other target, including custom labels, is applied as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SurveyState {
    #[default]
    Draft,
    Active,
    Closed,
    /// Any other label, stored verbatim (trimmed).
    Custom(String),
}

impl SurveyState {
    /// Parse a state label, case-insensitively.
    ///
    /// Accepts the legacy Spanish labels (`borrador`, `activa`, `cerrada`)
    /// that older databases still carry.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "draft" | "borrador" => Self::Draft,
            "active" | "activa" => Self::Active,
            "closed" | "cerrada" => Self::Closed,
            _ => Self::Custom(trimmed.to_string()),
        }
    }

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Custom(label) => label,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// A custom label with no visible characters.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Custom(label) if label.trim().is_empty())
    }
}

impl FromStr for SurveyState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for SurveyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SurveyState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SurveyState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label))
    }
}

impl JsonSchema for SurveyState {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("SurveyState")
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "description": "draft, active, closed, or a custom label"
        })
    }
}

// ---------------------------------------------------------------------------
// BankQuestionState
// ---------------------------------------------------------------------------

/// Availability of a question bank entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BankQuestionState {
    Active,
    Inactive,
    Draft,
}

impl BankQuestionState {
    /// Parse a bank state label, case-insensitively. Legacy labels
    /// (`activa`, `inactiva`, `borrador`) are accepted.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "active" | "activa" => Some(Self::Active),
            "inactive" | "inactiva" => Some(Self::Inactive),
            "draft" | "borrador" => Some(Self::Draft),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Draft => "draft",
        }
    }
}

impl fmt::Display for BankQuestionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
