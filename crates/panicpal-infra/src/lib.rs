//! Infrastructure layer for PanicPal.
//!
//! Contains implementations of the ports defined in `panicpal-core`: the
//! SQLite key-value store and the HTTP assistant client. Also loads
//! `config.toml` and resolves the data directory.

pub mod assistant;
pub mod config;
pub mod filesystem;
pub mod sqlite;
