//! Structured records of gateway and connector activity.
//!
//! Every outward call produces one [`Event`] that is emitted as a structured
//! log line once the call settles. Request and response payloads are only
//! attached through [`MaskedSerdeValue`] so secrets stay out of the logs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Wrapper type that enforces masked serialization for logged values.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct MaskedSerdeValue {
    inner: serde_json::Value,
}

impl MaskedSerdeValue {
    /// Mask-serialize `value`, failing loudly.
    pub fn from_masked<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        let masked_value = hyperswitch_masking::masked_serialize(value)?;
        Ok(Self {
            inner: masked_value,
        })
    }

    /// Mask-serialize `value`, logging and discarding on failure.
    pub fn from_masked_optional<T: Serialize>(value: &T, context: &str) -> Option<Self> {
        hyperswitch_masking::masked_serialize(value)
            .map(|masked_value| Self {
                inner: masked_value,
            })
            .inspect_err(|e| {
                tracing::error!(
                    error_category = ?e.classify(),
                    context = context,
                    "Failed to mask serialize data"
                );
            })
            .ok()
    }

    /// The masked value.
    pub fn inner(&self) -> &serde_json::Value {
        &self.inner
    }
}

/// Flow an event belongs to.
#[derive(strum::Display)]
#[strum(serialize_all = "snake_case")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowName {
    Authorize,
    Capture,
    Void,
    Refund,
    PaymentMethodToken,
    Unknown,
}

impl FlowName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorize => "Authorize",
            Self::Capture => "Capture",
            Self::Void => "Void",
            Self::Refund => "Refund",
            Self::PaymentMethodToken => "PaymentMethodToken",
            Self::Unknown => "Unknown",
        }
    }
}

/// Stage of processing an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStage {
    ConnectorCall,
    GatewayRequest,
}

impl EventStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectorCall => "CONNECTOR_CALL",
            Self::GatewayRequest => "GATEWAY_REQUEST",
        }
    }
}

/// One record of gateway or connector activity.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub request_id: String,
    pub timestamp: i128,
    pub flow_type: FlowName,
    pub connector: String,
    pub url: Option<String>,
    pub stage: EventStage,
    pub latency_ms: Option<u64>,
    pub status_code: Option<u16>,
    pub request_data: Option<MaskedSerdeValue>,
    pub response_data: Option<MaskedSerdeValue>,
    pub headers: HashMap<String, String>,
    #[serde(flatten)]
    pub additional_fields: HashMap<String, MaskedSerdeValue>,
}

impl Event {
    /// Start an event for the given flow against the given connector.
    pub fn new(
        request_id: String,
        flow_type: FlowName,
        connector: &str,
        stage: EventStage,
    ) -> Self {
        Self {
            request_id,
            timestamp: time::OffsetDateTime::now_utc().unix_timestamp_nanos(),
            flow_type,
            connector: connector.to_string(),
            url: None,
            stage,
            latency_ms: None,
            status_code: None,
            request_data: None,
            response_data: None,
            headers: HashMap::new(),
            additional_fields: HashMap::new(),
        }
    }

    pub fn add_reference_id(&mut self, reference_id: Option<&str>) {
        let masked_ref = reference_id.and_then(|ref_id| {
            MaskedSerdeValue::from_masked_optional(&ref_id.to_string(), "reference_id")
        });
        if let Some(masked_ref) = masked_ref {
            self.additional_fields
                .insert("reference_id".to_string(), masked_ref);
        }
    }

    pub fn set_request_data<R: Serialize>(&mut self, request: &R) {
        self.request_data = MaskedSerdeValue::from_masked_optional(request, "connector_request");
    }

    pub fn set_connector_response<R: Serialize>(&mut self, response: &R) {
        self.response_data = MaskedSerdeValue::from_masked_optional(response, "connector_response");
    }

    /// Emit the event as one structured log line.
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(event) => {
                tracing::info!(
                    target: "gateway_events",
                    event = %event,
                    stage = self.stage.as_str(),
                    flow = self.flow_type.as_str(),
                    "event"
                );
            }
            Err(error) => {
                tracing::error!(?error, "failed to serialize event");
            }
        }
    }
}
