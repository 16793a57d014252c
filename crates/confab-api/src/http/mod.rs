//! HTTP/REST API layer for Confab.
//!
//! Axum-based REST API at `/api/chat` with request validation at the
//! boundary and CORS support.

pub mod error;
pub mod handlers;
pub mod router;
