//! Structured capture of a single connector API call.

use common_utils::events::FlowName;
use serde::Serialize;

/// Everything worth logging about one request/response exchange with a
/// connector. Bodies are stored masked, never raw.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectorEvent {
    connector_name: String,
    flow: FlowName,
    request_id: String,
    created_at: i128,
    status_code: Option<u16>,
    response: Option<String>,
    error: Option<String>,
    latency_ms: Option<u128>,
}

impl ConnectorEvent {
    pub fn new(connector_name: String, flow: FlowName, request_id: String) -> Self {
        Self {
            connector_name,
            flow,
            request_id,
            created_at: time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000,
            status_code: None,
            response: None,
            error: None,
            latency_ms: None,
        }
    }

    pub fn set_status_code(&mut self, status_code: u16) {
        self.status_code = Some(status_code);
    }

    pub fn set_latency(&mut self, latency_ms: u128) {
        self.latency_ms = Some(latency_ms);
    }

    /// Record the parsed response body. Secrets are masked before the body
    /// is stored.
    pub fn set_response_body<T: Serialize>(&mut self, response: &T) {
        match hyperswitch_masking::masked_serialize(response) {
            Ok(masked) => self.response = Some(masked.to_string()),
            Err(error) => tracing::warn!(serialization_error = ?error),
        }
    }

    /// Record the parsed error body returned by the connector.
    pub fn set_error_response_body<T: Serialize>(&mut self, response: &T) {
        self.set_response_body(response);
    }

    pub fn set_error(&mut self, error: serde_json::Value) {
        self.error = Some(error.to_string());
    }
}
