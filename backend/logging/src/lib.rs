//! Structured logging for MathLens.
//!
//! Handles tracing bootstrap (console + rolling NDJSON file) and redaction of
//! provider credentials before upstream error bodies reach the log.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
