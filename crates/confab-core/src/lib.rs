//! Conversation assembly logic and trait definitions for Confab.
//!
//! This crate defines the "ports" (the [`chat::store::TurnStore`] and
//! [`llm::gateway::LlmGateway`] traits) that the infrastructure layer
//! implements. It depends only on `confab-types` -- never on `confab-infra`
//! or any database/HTTP crate.

pub mod chat;
pub mod llm;
