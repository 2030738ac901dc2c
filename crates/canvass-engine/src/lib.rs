//! # canvass-engine
//!
//! Business rules for canvass surveys, written against the repository
//! traits in `canvass-core` so any store can back them.
//!
//! - [`lifecycle`]: create, edit, activate, delete, and copy surveys
//! - [`association`]: attach, reorder, and detach survey questions
//! - [`bank`]: manage the reusable question bank
//! - [`guard`]: has a respondent already answered a survey?
//! - [`participation`]: record a respondent's session atomically
//! - [`listing`]: in-memory sort and lookup helpers
//!
//! Managers borrow the store; construct them per operation.

pub mod association;
pub mod bank;
pub mod guard;
pub mod lifecycle;
pub mod listing;
pub mod participation;
pub mod updates;

#[cfg(test)]
mod test_support;

pub use association::{InlineQuestionInput, LinkPlacement, QuestionAssociation};
pub use bank::{BankQuestionDraft, QuestionBank};
pub use guard::ResponseGuard;
pub use lifecycle::{SurveyDraft, SurveyLifecycle};
pub use participation::{ParticipationRecorder, SessionSubmission, SubmittedAnswer};
pub use updates::{SurveyUpdate, SurveyUpdateBuilder};
