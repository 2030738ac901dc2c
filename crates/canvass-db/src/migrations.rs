//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` / `INSERT OR IGNORE` for
//! idempotent re-running.

use crate::CanvassDb;
use crate::error::DatabaseError;

/// Initial schema: 6 tables, 5 indexes, seeded question types and classifications.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl CanvassDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
