//! CLI-facing defaults.

use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Row cap for list and search commands when `--limit` is absent.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Administrator recorded on surveys created or copied without `--admin`.
    #[serde(default)]
    pub admin_id: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            admin_id: None,
        }
    }
}

impl GeneralConfig {
    /// `explicit` if given, else the configured admin. Blank values count as absent.
    #[must_use]
    pub fn admin_or<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit
            .or(self.admin_id.as_deref())
            .map(str::trim)
            .filter(|admin| !admin.is_empty())
    }
}
