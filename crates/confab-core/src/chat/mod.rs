//! Conversation assembly and turn persistence abstractions.
//!
//! This module defines the `TurnStore` trait that the infrastructure layer
//! implements, the session identity policy, and the `ChatService` that
//! orchestrates a full conversation round-trip.

pub mod service;
pub mod session;
pub mod store;
