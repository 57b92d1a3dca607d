use common_enums::CurrencyUnit;
use common_utils::{consts, CustomResult};
use domain_types::{
    errors::ConnectorError,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_response_types::Response,
    types::Connectors,
};
use hyperswitch_masking::Maskable;

use crate::events::connector_api_logs::ConnectorEvent;

/// Connector properties that hold for every flow.
pub trait ConnectorCommon {
    /// Name of the connector, as used in configuration and logging.
    fn id(&self) -> &'static str;

    /// Currency unit the connector expects amounts in.
    fn get_currency_unit(&self) -> CurrencyUnit {
        CurrencyUnit::Minor
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    /// The connector's base url from the gateway configuration.
    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str;

    /// Headers carrying the connector credentials.
    fn get_auth_header(
        &self,
        _auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(Vec::new())
    }

    /// Parse an error body returned by the connector into an [`ErrorResponse`].
    fn build_error_response(
        &self,
        res: Response,
        _event_builder: Option<&mut ConnectorEvent>,
    ) -> CustomResult<ErrorResponse, ConnectorError> {
        Ok(ErrorResponse {
            status_code: res.status_code,
            code: consts::NO_ERROR_CODE.to_string(),
            message: consts::NO_ERROR_MESSAGE.to_string(),
            reason: None,
            attempt_status: None,
            connector_transaction_id: None,
            network_decline_code: None,
            network_advice_code: None,
            network_error_message: None,
        })
    }
}
