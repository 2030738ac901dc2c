//! Database error types for canvass-db.

use canvass_core::errors::StoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl From<DatabaseError> for StoreError {
    fn from(err: DatabaseError) -> Self {
        let context = match &err {
            DatabaseError::Query(_) | DatabaseError::NoResult => "query",
            DatabaseError::Migration(_) => "migration",
            DatabaseError::InvalidState(_) => "stored data",
            DatabaseError::LibSql(_) => "libsql",
        };
        Self::new(context, err)
    }
}
