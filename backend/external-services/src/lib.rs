//! Outbound HTTP execution: building, sending and interpreting the one
//! processor call behind each connector flow.

pub mod service;
pub use service::*;
