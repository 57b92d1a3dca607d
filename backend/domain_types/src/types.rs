use serde::{Deserialize, Serialize};

use crate::connector_types::{PaymentFlowData, RefundFlowData};

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct Connectors {
    pub alliedwallet: ConnectorParams,
}

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct ConnectorParams {
    /// base url
    #[serde(default)]
    pub base_url: String,
}

impl ConnectorParams {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

// Trait to provide access to connectors field
pub trait HasConnectors {
    fn connectors(&self) -> &Connectors;
}

impl HasConnectors for PaymentFlowData {
    fn connectors(&self) -> &Connectors {
        &self.connectors
    }
}

impl HasConnectors for RefundFlowData {
    fn connectors(&self) -> &Connectors {
        &self.connectors
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq, Hash)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    pub bypass_proxy_urls: Vec<String>,
}
