use anyhow::{Context, anyhow};
use canvass_core::enums::BankQuestionState;
use chrono::{DateTime, NaiveDate, Utc};

/// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` date as midnight UTC.
pub fn parse_datetime(raw: &str, field: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .with_context(|| format!("invalid {field} '{raw}': expected RFC 3339 or YYYY-MM-DD"))
}

pub fn parse_bank_state(raw: &str) -> anyhow::Result<BankQuestionState> {
    BankQuestionState::parse(raw)
        .ok_or_else(|| anyhow!("invalid state '{raw}': expected active, inactive, or draft"))
}
