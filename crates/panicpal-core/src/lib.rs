//! Conversation session logic and port traits for PanicPal.
//!
//! This crate defines the "ports" (`KvStore`, `AssistantClient`) that the
//! infrastructure layer implements, and the session logic built on them.
//! It depends only on `panicpal-types` -- never on `panicpal-infra` or any
//! database/IO crate.

pub mod assistant;
pub mod conversation;
pub mod loading;
pub mod persistence;
pub mod session;
pub mod storage;
