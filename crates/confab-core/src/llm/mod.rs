//! Model gateway abstraction.

pub mod gateway;
