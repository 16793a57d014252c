//! SQLite turn store implementation.
//!
//! Implements `TurnStore` from `confab-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, row-to-domain
//! conversion with defensive handling of malformed rows.

use chrono::{DateTime, Utc};
use sqlx::Row;

use confab_core::chat::store::TurnStore;
use confab_types::error::StorageError;
use confab_types::turn::{Turn, TurnRole};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `TurnStore`.
pub struct SqliteTurnStore {
    pool: DatabasePool,
}

impl SqliteTurnStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Turns.
struct TurnRow {
    id: i64,
    session_id: String,
    role: String,
    content: String,
    timestamp: String,
}

impl TurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    /// Convert to a domain Turn.
    ///
    /// Returns `Ok(None)` for rows whose role string is not a recognized
    /// `TurnRole` -- a data-integrity violation in one row must not abort an
    /// entire conversation, so such rows are logged and dropped from results.
    fn into_turn(self) -> Result<Option<Turn>, StorageError> {
        let role: TurnRole = match self.role.parse() {
            Ok(role) => role,
            Err(err) => {
                tracing::warn!(turn_id = self.id, error = %err, "skipping turn with unrecognized role");
                return Ok(None);
            }
        };
        let timestamp = parse_datetime(&self.timestamp)?;

        Ok(Some(Turn {
            id: self.id,
            session_id: self.session_id,
            role,
            content: self.content,
            timestamp,
        }))
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn storage_err(e: sqlx::Error) -> StorageError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StorageError::Connection
        }
        other => StorageError::Query(other.to_string()),
    }
}

fn rows_to_turns(rows: Vec<sqlx::sqlite::SqliteRow>) -> Result<Vec<Turn>, StorageError> {
    let mut turns = Vec::with_capacity(rows.len());
    for row in &rows {
        let turn_row = TurnRow::from_row(row).map_err(|e| StorageError::Query(e.to_string()))?;
        if let Some(turn) = turn_row.into_turn()? {
            turns.push(turn);
        }
    }
    Ok(turns)
}

impl TurnStore for SqliteTurnStore {
    async fn append(
        &self,
        session_id: &str,
        role: TurnRole,
        content: &str,
    ) -> Result<Turn, StorageError> {
        let timestamp = Utc::now();

        let result = sqlx::query(
            "INSERT INTO turns (session_id, role, content, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(session_id)
        .bind(role.to_string())
        .bind(content)
        .bind(format_datetime(&timestamp))
        .execute(&self.pool.writer)
        .await
        .map_err(storage_err)?;

        Ok(Turn {
            id: result.last_insert_rowid(),
            session_id: session_id.to_string(),
            role,
            content: content.to_string(),
            timestamp,
        })
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Turn>, StorageError> {
        let rows = sqlx::query(
            "SELECT * FROM turns WHERE session_id = ? ORDER BY timestamp ASC, id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(storage_err)?;

        rows_to_turns(rows)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Turn>, StorageError> {
        let rows = sqlx::query("SELECT * FROM turns ORDER BY timestamp DESC, id DESC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(storage_err)?;

        rows_to_turns(rows)
    }

    async fn delete_by_session(&self, session_id: &str) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM turns WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool.writer)
            .await
            .map_err(storage_err)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> (tempfile::TempDir, SqliteTurnStore) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, SqliteTurnStore::new(pool))
    }

    #[tokio::test]
    async fn test_append_assigns_monotonic_ids() {
        let (_dir, store) = test_store().await;

        let first = store.append("s1", TurnRole::User, "Hello").await.unwrap();
        let second = store
            .append("s1", TurnRole::Assistant, "Hi there")
            .await
            .unwrap();

        assert!(second.id > first.id);
        assert!(second.timestamp >= first.timestamp);
    }

    #[tokio::test]
    async fn test_list_by_session_orders_ascending() {
        let (_dir, store) = test_store().await;

        store.append("s1", TurnRole::User, "one").await.unwrap();
        store.append("s1", TurnRole::Assistant, "two").await.unwrap();
        store.append("s2", TurnRole::User, "other session").await.unwrap();
        store.append("s1", TurnRole::User, "three").await.unwrap();

        let turns = store.list_by_session("s1").await.unwrap();
        let contents: Vec<&str> = turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three"]);
        assert!(turns.windows(2).all(|w| (w[0].timestamp, w[0].id) <= (w[1].timestamp, w[1].id)));
    }

    #[tokio::test]
    async fn test_id_breaks_timestamp_ties() {
        let (_dir, store) = test_store().await;

        // Two rows sharing an exact timestamp, inserted out of content order.
        for content in ["first", "second"] {
            sqlx::query(
                "INSERT INTO turns (session_id, role, content, timestamp) VALUES ('s1', 'user', ?, '2026-01-01T00:00:00+00:00')",
            )
            .bind(content)
            .execute(&store.pool.writer)
            .await
            .unwrap();
        }

        let turns = store.list_by_session("s1").await.unwrap();
        assert_eq!(turns[0].content, "first");
        assert_eq!(turns[1].content, "second");
        assert!(turns[0].id < turns[1].id);
    }

    #[tokio::test]
    async fn test_list_by_session_empty_for_unknown() {
        let (_dir, store) = test_store().await;
        assert!(store.list_by_session("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_recent_descending_and_truncated() {
        let (_dir, store) = test_store().await;

        for i in 0..12 {
            let session = if i % 2 == 0 { "s1" } else { "s2" };
            store
                .append(session, TurnRole::User, &format!("m{i}"))
                .await
                .unwrap();
        }

        let recent = store.list_recent(10).await.unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].content, "m11");
        assert!(recent.windows(2).all(|w| (w[0].timestamp, w[0].id) >= (w[1].timestamp, w[1].id)));
    }

    #[tokio::test]
    async fn test_delete_by_session_is_idempotent() {
        let (_dir, store) = test_store().await;

        store.append("s1", TurnRole::User, "x").await.unwrap();
        store.append("s1", TurnRole::Assistant, "y").await.unwrap();

        assert_eq!(store.delete_by_session("s1").await.unwrap(), 2);
        assert_eq!(store.delete_by_session("s1").await.unwrap(), 0);
        assert_eq!(store.delete_by_session("never-existed").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_malformed_role_row_is_skipped() {
        let (_dir, store) = test_store().await;

        store.append("s1", TurnRole::User, "good").await.unwrap();
        // A role outside the closed enum, written behind the store's back.
        sqlx::query(
            "INSERT INTO turns (session_id, role, content, timestamp) VALUES ('s1', 'system', 'bad', '2030-01-01T00:00:00+00:00')",
        )
        .execute(&store.pool.writer)
        .await
        .unwrap();

        let turns = store.list_by_session("s1").await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "good");
    }

    #[tokio::test]
    async fn test_read_after_write_sees_new_turn() {
        let (_dir, store) = test_store().await;

        let appended = store.append("s1", TurnRole::User, "Hello").await.unwrap();
        let turns = store.list_by_session("s1").await.unwrap();

        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].id, appended.id);
        assert_eq!(turns[0].content, "Hello");
    }
}
