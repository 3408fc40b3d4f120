//! The live conversation and its invariants.

pub mod store;
