//! SQLite storage layer.
//!
//! `KvStore` backed by SQLite with WAL mode and split read/write pools.

pub mod kv;
pub mod pool;
