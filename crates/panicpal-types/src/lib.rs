//! Shared domain types for PanicPal.
//!
//! This crate contains the types used across the workspace: turns and
//! conversations, the assistant wire format, configuration, and errors.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod assistant;
pub mod config;
pub mod conversation;
pub mod error;
