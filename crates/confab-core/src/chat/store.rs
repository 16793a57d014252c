//! TurnStore trait definition.
//!
//! Provides append/list/delete operations over the persisted turn log.
//! Implementations live in confab-infra (e.g., `SqliteTurnStore`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use confab_types::error::StorageError;
use confab_types::turn::{Turn, TurnRole};

/// Store trait for the ordered, append-only turn log.
///
/// The store assigns `id` and `timestamp` at write time. All list operations
/// order by (`timestamp`, `id`) so that `id` breaks ties when the timestamp
/// resolution is coarser than inter-turn latency.
pub trait TurnStore: Send + Sync {
    /// Append a turn to a session's log. Returns the stored turn with its
    /// assigned `id` and `timestamp`.
    fn append(
        &self,
        session_id: &str,
        role: TurnRole,
        content: &str,
    ) -> impl std::future::Future<Output = Result<Turn, StorageError>> + Send;

    /// All turns for a session, ascending by (`timestamp`, `id`).
    ///
    /// An unknown session yields an empty vec, not an error.
    fn list_by_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, StorageError>> + Send;

    /// Most-recent turns across all sessions, descending by
    /// (`timestamp`, `id`), truncated to `limit`.
    fn list_recent(
        &self,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, StorageError>> + Send;

    /// Delete every turn in a session. Idempotent; returns the number of
    /// rows removed (0 for an unknown session, still success).
    fn delete_by_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<u64, StorageError>> + Send;
}
