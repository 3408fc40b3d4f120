//! Remote assistant endpoint adapters.

pub mod http;
