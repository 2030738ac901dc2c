//! ID prefix constants.
//!
//! Every entity id is `{prefix}-{8 hex chars}`, generated by the store.

pub const PREFIX_SURVEY: &str = "svy";
pub const PREFIX_LINK: &str = "lnk";
pub const PREFIX_BANK_QUESTION: &str = "qbk";
pub const PREFIX_ANSWER: &str = "ans";
pub const PREFIX_QUESTION_TYPE: &str = "qty";
pub const PREFIX_CLASSIFICATION: &str = "cls";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_SURVEY,
    PREFIX_LINK,
    PREFIX_BANK_QUESTION,
    PREFIX_ANSWER,
    PREFIX_QUESTION_TYPE,
    PREFIX_CLASSIFICATION,
];

/// Return the prefix portion of an id (`"svy-a3f8b2c1"` -> `Some("svy")`).
#[must_use]
pub fn prefix_of(id: &str) -> Option<&str> {
    id.split_once('-').map(|(prefix, _)| prefix)
}
