//! The remote assistant port and the dispatcher that wraps it.

pub mod box_client;
pub mod client;
pub mod dispatcher;
