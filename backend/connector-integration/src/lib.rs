//! Connector implementations: per-flow request construction and response
//! interpretation for each supported payment processor.

pub mod connectors;
pub mod types;
