//! Shared domain types for Confab.
//!
//! This crate contains the core domain types used across the Confab service:
//! persisted turns, model gateway request/response shapes, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod error;
pub mod llm;
pub mod turn;
