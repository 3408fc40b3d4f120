//! Durable storage of the conversation across restarts.

pub mod gateway;
