//! # canvass-db
//!
//! libSQL storage for canvass: surveys, the question bank and its catalogs,
//! survey question links, and response answers.
//!
//! `CanvassDb` owns a single local connection. Repository methods live in
//! [`repos`] as `impl CanvassDb` blocks returning [`DatabaseError`], and the
//! same module implements the `canvass-core` repository traits on top of them
//! so the engine can stay storage-agnostic.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all canvass state.
///
/// Wraps a libSQL database and connection and provides id generation.
pub struct CanvassDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl CanvassDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let canvass_db = Self { db, conn };
        canvass_db.run_migrations().await?;
        tracing::debug!(path, "opened canvass database");
        Ok(canvass_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"svy-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        generate_id_on(&self.conn, prefix).await
    }
}

/// Generate a prefixed id on a specific connection, so ids can be minted
/// inside an open transaction.
///
/// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
pub(crate) async fn generate_id_on(
    conn: &libsql::Connection,
    prefix: &str,
) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
            (),
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::test_support::helpers::test_db;

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "question_types",
            "classifications",
            "surveys",
            "question_bank",
            "survey_questions",
            "answers",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn catalogs_are_seeded() {
        let db = test_db().await;
        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM question_types", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 6);
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("svy").await.unwrap();
        assert!(id.starts_with("svy-"), "ID should start with 'svy-': {id}");
        assert_eq!(
            id.len(),
            12,
            "ID should be 12 chars (3 prefix + 1 dash + 8 hex): {id}"
        );

        let hex_part = &id[4..];
        assert!(
            hex_part.chars().all(|c| c.is_ascii_hexdigit()),
            "Random part should be hex: {hex_part}"
        );
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in canvass_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        // Run migrations again; seeds must not duplicate
        db.run_migrations().await.unwrap();
        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM classifications", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 4);
    }

    #[tokio::test]
    async fn link_must_reference_exactly_one_source() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO surveys (id, name, starts_at, ends_at, audience_size, state, created_at, admin_id)
                 VALUES ('svy-t1', 'T', '2025-01-01T00:00:00+00:00', '2025-01-31T00:00:00+00:00', 1, 'draft', '2025-01-01T00:00:00+00:00', 'a')",
                (),
            )
            .await
            .unwrap();

        let neither = db
            .conn()
            .execute(
                "INSERT INTO survey_questions (id, survey_id, position) VALUES ('lnk-t1', 'svy-t1', 1)",
                (),
            )
            .await;
        assert!(neither.is_err(), "link without a source should be rejected");
    }
}
