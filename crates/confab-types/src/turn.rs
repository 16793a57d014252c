//! Persisted conversation turn types.
//!
//! A [`Turn`] is one stored message (user or assistant) within a session.
//! Sessions themselves are not stored entities -- they are emergent groupings
//! of turns sharing a `session_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of a persisted turn.
///
/// A closed two-value enumeration; maps to the CHECK constraint in the
/// SQLite schema. Any other stored string is a data-integrity violation
/// and is skipped when reading (see the store implementation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// A single persisted message within a session.
///
/// `id` and `timestamp` are assigned by the store at write time. Within a
/// session, turns are strictly ordered by (`timestamp`, `id`) ascending;
/// `id` is the sole tie-breaker when timestamps collide. Readers must not
/// assume strict user/assistant alternation: a failed model call leaves a
/// dangling unanswered user turn, which is an accepted state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub id: i64,
    pub session_id: String,
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}
