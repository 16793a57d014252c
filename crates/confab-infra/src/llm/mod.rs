//! Model gateway implementations.

pub mod openai;
pub mod types;
