//! Observability setup for PanicPal: tracing subscriber and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
