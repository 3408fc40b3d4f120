//! Transient "thinking" turn shown while a reply is pending.

pub mod indicator;
