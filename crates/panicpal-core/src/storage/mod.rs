//! Storage abstractions for PanicPal.
//!
//! Defines the durable key-value store port and an in-memory implementation.
//! The SQLite implementation lives in panicpal-infra.

pub mod kv_store;
pub mod memory;
