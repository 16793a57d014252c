//! Session identity policy.
//!
//! Decides whether an inbound request carries a usable session identifier
//! or must mint a new one. Pure function, no side effects, no store lookup.

use uuid::Uuid;

/// Resolve the session identifier for an inbound request.
///
/// A present, non-empty candidate is returned unchanged -- resuming a session
/// with an id that has no prior turns is valid and simply starts with an
/// empty history. An absent or empty candidate mints a fresh UUID v7
/// (time-sortable, collision probability negligible).
pub fn resolve_session_id(candidate: Option<&str>) -> String {
    match candidate {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::now_v7().to_string(),
    }
}
