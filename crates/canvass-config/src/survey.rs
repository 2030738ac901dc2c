//! Survey authoring rules.

use serde::{Deserialize, Serialize};

fn default_copy_prefix() -> String {
    "Copy of ".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SurveyRulesConfig {
    /// Prepended to the name of a copied survey.
    #[serde(default = "default_copy_prefix")]
    pub copy_prefix: String,
}

impl Default for SurveyRulesConfig {
    fn default() -> Self {
        Self {
            copy_prefix: default_copy_prefix(),
        }
    }
}

impl SurveyRulesConfig {
    /// Name given to a copy of the survey called `name`.
    #[must_use]
    pub fn copy_name(&self, name: &str) -> String {
        format!("{}{name}", self.copy_prefix)
    }
}
