//! SQLite storage layer.
//!
//! Turn store implementation backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod pool;
pub mod turn;
