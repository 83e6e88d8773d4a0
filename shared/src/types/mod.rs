//! Common type definitions shared across server crates

pub mod language;
pub mod response;

pub use language::Language;
pub use response::ApiEnvelope;
