//! Cross-cutting error types for canvass.
//!
//! `SurveyError` is what every engine operation returns. `StoreError` is the
//! failure type carried across the repository traits; storage crates convert
//! their own error types into it at the trait boundary.

use thiserror::Error;

/// Persistence failure reported by a repository implementation.
#[derive(Debug, Error)]
#[error("{context}: {source}")]
pub struct StoreError {
    context: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl StoreError {
    pub fn new(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Short description of the operation that failed.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }
}

/// Errors returned by survey, question, and participation operations.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// Input broke a rule; detected before any write.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced survey, link, or question does not exist.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SurveyError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
