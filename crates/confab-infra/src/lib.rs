//! Infrastructure layer for Confab.
//!
//! Contains implementations of the traits defined in `confab-core`:
//! the SQLite turn store and the OpenAI-compatible model gateway.

pub mod llm;
pub mod sqlite;
