use std::collections::HashMap;

use common_enums::{AttemptStatus, AuthenticationType, Currency, PaymentMethod, PaymentMethodType};
use common_utils::{
    errors, pii::IpAddress, types::MinorUnit, CustomResult, CustomerId, Email, SecretSerdeValue,
};
use error_stack::ResultExt;
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    errors::ConnectorError,
    payment_address::{self, Address},
    payment_method_data::{PaymentMethodData, PaymentMethodDataTypes},
    router_data::PaymentMethodToken,
    router_request_types::BrowserInformation,
    types::Connectors,
    utils::Error,
};

// snake case for enum variants
#[derive(Clone, Copy, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ConnectorEnum {
    Alliedwallet,
}

pub trait RawConnectorRequestResponse {
    fn set_raw_connector_response(&mut self, response: Option<Secret<String>>);
    fn get_raw_connector_response(&self) -> Option<Secret<String>>;
    fn set_raw_connector_request(&mut self, request: Option<Secret<String>>);
    fn get_raw_connector_request(&self) -> Option<Secret<String>>;
}

pub trait ConnectorResponseHeaders {
    fn set_connector_response_headers(&mut self, headers: Option<http::HeaderMap>);
    fn get_connector_response_headers(&self) -> Option<&http::HeaderMap>;
    fn get_connector_response_headers_as_map(&self) -> HashMap<String, String> {
        self.get_connector_response_headers()
            .map(|headers| {
                headers
                    .iter()
                    .filter_map(|(name, value)| {
                        value
                            .to_str()
                            .ok()
                            .map(|v| (name.to_string(), v.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct PaymentFlowData {
    pub merchant_id: common_utils::id_type::MerchantId,
    pub customer_id: Option<CustomerId>,
    pub payment_id: String,
    pub attempt_id: String,
    pub status: AttemptStatus,
    pub payment_method: PaymentMethod,
    pub description: Option<String>,
    pub address: payment_address::PaymentAddress,
    pub auth_type: AuthenticationType,
    pub reference_id: Option<String>,
    pub payment_method_token: Option<PaymentMethodToken>,
    /// Contains a reference ID that should be sent in the connector request
    pub connector_request_reference_id: String,
    pub test_mode: Option<bool>,
    pub connector_http_status_code: Option<u16>,
    pub connector_response_headers: Option<http::HeaderMap>,
    pub external_latency: Option<u128>,
    pub connectors: Connectors,
    pub raw_connector_response: Option<Secret<String>>,
    pub raw_connector_request: Option<Secret<String>>,
}

impl PaymentFlowData {
    pub fn get_optional_billing(&self) -> Option<&Address> {
        self.address.get_payment_method_billing()
    }

    pub fn get_optional_billing_full_name(&self) -> Option<Secret<String>> {
        self.get_optional_billing()
            .and_then(|billing_details| billing_details.address.as_ref())
            .and_then(|billing_address| billing_address.get_optional_full_name())
    }

    pub fn get_optional_billing_first_name(&self) -> Option<Secret<String>> {
        self.address
            .get_payment_method_billing()
            .and_then(|billing_address| {
                billing_address
                    .clone()
                    .address
                    .and_then(|billing_details| billing_details.first_name)
            })
    }

    pub fn get_optional_billing_last_name(&self) -> Option<Secret<String>> {
        self.address
            .get_payment_method_billing()
            .and_then(|billing_address| {
                billing_address
                    .clone()
                    .address
                    .and_then(|billing_details| billing_details.last_name)
            })
    }

    pub fn get_optional_billing_line1(&self) -> Option<Secret<String>> {
        self.address
            .get_payment_method_billing()
            .and_then(|billing_address| {
                billing_address
                    .clone()
                    .address
                    .and_then(|billing_details| billing_details.line1)
            })
    }

    pub fn get_optional_billing_line2(&self) -> Option<Secret<String>> {
        self.address
            .get_payment_method_billing()
            .and_then(|billing_address| {
                billing_address
                    .clone()
                    .address
                    .and_then(|billing_details| billing_details.line2)
            })
    }

    pub fn get_optional_billing_city(&self) -> Option<Secret<String>> {
        self.address
            .get_payment_method_billing()
            .and_then(|billing_address| {
                billing_address
                    .clone()
                    .address
                    .and_then(|billing_details| billing_details.city)
            })
    }

    pub fn get_optional_billing_state(&self) -> Option<Secret<String>> {
        self.address
            .get_payment_method_billing()
            .and_then(|billing_address| {
                billing_address
                    .clone()
                    .address
                    .and_then(|billing_details| billing_details.state)
            })
    }

    pub fn get_optional_billing_zip(&self) -> Option<Secret<String>> {
        self.address
            .get_payment_method_billing()
            .and_then(|billing_address| {
                billing_address
                    .clone()
                    .address
                    .and_then(|billing_details| billing_details.zip)
            })
    }

    pub fn get_optional_billing_country(&self) -> Option<common_enums::CountryAlpha2> {
        self.address
            .get_payment_method_billing()
            .and_then(|billing_address| {
                billing_address
                    .clone()
                    .address
                    .and_then(|billing_details| billing_details.country)
            })
    }

    pub fn get_optional_billing_phone_number(&self) -> Option<Secret<String>> {
        self.address
            .get_payment_method_billing()
            .and_then(|billing_address| {
                billing_address
                    .clone()
                    .phone
                    .and_then(|phone_data| phone_data.number)
            })
    }

    pub fn get_optional_billing_email(&self) -> Option<Email> {
        self.address
            .get_payment_method_billing()
            .and_then(|billing_address| billing_address.clone().email)
    }

    pub fn get_optional_payment_method_token(&self) -> Option<Secret<String>> {
        self.payment_method_token.as_ref().map(|token| match token {
            PaymentMethodToken::Token(secret) => secret.clone(),
        })
    }

    pub fn set_payment_method_token(mut self, payment_method_token: Option<String>) -> Self {
        if payment_method_token.is_some() && self.payment_method_token.is_none() {
            self.payment_method_token =
                payment_method_token.map(|token| PaymentMethodToken::Token(Secret::new(token)));
        }
        self
    }
}

impl RawConnectorRequestResponse for PaymentFlowData {
    fn set_raw_connector_response(&mut self, response: Option<Secret<String>>) {
        self.raw_connector_response = response;
    }

    fn get_raw_connector_response(&self) -> Option<Secret<String>> {
        self.raw_connector_response.clone()
    }

    fn set_raw_connector_request(&mut self, request: Option<Secret<String>>) {
        self.raw_connector_request = request;
    }

    fn get_raw_connector_request(&self) -> Option<Secret<String>> {
        self.raw_connector_request.clone()
    }
}

impl ConnectorResponseHeaders for PaymentFlowData {
    fn set_connector_response_headers(&mut self, headers: Option<http::HeaderMap>) {
        self.connector_response_headers = headers;
    }

    fn get_connector_response_headers(&self) -> Option<&http::HeaderMap> {
        self.connector_response_headers.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct PaymentsAuthorizeData<T: PaymentMethodDataTypes> {
    pub payment_method_data: PaymentMethodData<T>,
    /// total amount, in the minor unit of `currency`
    pub amount: MinorUnit,
    pub email: Option<Email>,
    pub customer_name: Option<String>,
    pub currency: Currency,
    pub confirm: bool,
    pub capture_method: Option<common_enums::CaptureMethod>,
    pub browser_info: Option<BrowserInformation>,
    pub payment_method_type: Option<PaymentMethodType>,
    pub customer_id: Option<CustomerId>,
    pub metadata: Option<SecretSerdeValue>,
    // New amount for amount framework
    pub minor_amount: MinorUnit,
    /// Merchant's identifier for the payment/invoice. This will be sent to the connector
    /// if the connector provides support to accept multiple reference ids.
    /// In case the connector supports only one reference id, the payment ID will be sent as reference.
    pub merchant_order_reference_id: Option<String>,
}

impl<T: PaymentMethodDataTypes> PaymentsAuthorizeData<T> {
    pub fn is_auto_capture(&self) -> Result<bool, Error> {
        match self.capture_method {
            Some(common_enums::CaptureMethod::Automatic)
            | None
            | Some(common_enums::CaptureMethod::SequentialAutomatic) => Ok(true),
            Some(common_enums::CaptureMethod::Manual) => Ok(false),
            Some(_) => Err(ConnectorError::CaptureMethodNotSupported.into()),
        }
    }

    pub fn get_optional_email(&self) -> Option<Email> {
        self.email.clone()
    }

    pub fn get_ip_address_as_optional(&self) -> Option<Secret<String, IpAddress>> {
        self.browser_info.clone().and_then(|browser_info| {
            browser_info
                .ip_address
                .map(|ip| Secret::new(ip.to_string()))
        })
    }
}

#[derive(Debug, Clone)]
pub struct PaymentVoidData {
    pub connector_transaction_id: String,
    pub cancellation_reason: Option<String>,
    pub browser_info: Option<BrowserInformation>,
    pub amount: Option<MinorUnit>,
    pub currency: Option<Currency>,
}

#[derive(Debug, Default, Clone)]
pub struct PaymentsCaptureData {
    pub amount_to_capture: i64,
    pub minor_amount_to_capture: MinorUnit,
    pub currency: Currency,
    pub connector_transaction_id: ResponseId,
    pub browser_info: Option<BrowserInformation>,
    pub capture_method: Option<common_enums::CaptureMethod>,
    pub merchant_order_reference_id: Option<String>,
}

impl PaymentsCaptureData {
    pub fn get_connector_transaction_id(&self) -> CustomResult<String, ConnectorError> {
        match self.connector_transaction_id.clone() {
            ResponseId::ConnectorTransactionId(txn_id) => Ok(txn_id),
            _ => Err(errors::ValidationError::IncorrectValueProvided {
                field_name: "connector_transaction_id",
            })
            .attach_printable("Expected connector transaction ID not found")
            .change_context(ConnectorError::MissingConnectorTransactionID)?,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RefundsData {
    pub refund_id: String,
    pub connector_transaction_id: String,
    pub currency: Currency,
    pub payment_amount: i64,
    pub reason: Option<String>,
    pub refund_amount: i64,
    pub minor_payment_amount: MinorUnit,
    pub minor_refund_amount: MinorUnit,
    pub refund_status: common_enums::RefundStatus,
    pub capture_method: Option<common_enums::CaptureMethod>,
    pub browser_info: Option<BrowserInformation>,
}

#[derive(Debug, Clone)]
pub struct RefundFlowData {
    pub merchant_id: common_utils::id_type::MerchantId,
    pub status: common_enums::RefundStatus,
    pub refund_id: Option<String>,
    pub connectors: Connectors,
    pub connector_request_reference_id: String,
    pub raw_connector_response: Option<Secret<String>>,
    pub connector_response_headers: Option<http::HeaderMap>,
    pub raw_connector_request: Option<Secret<String>>,
    pub test_mode: Option<bool>,
    pub payment_method: Option<PaymentMethod>,
}

impl RawConnectorRequestResponse for RefundFlowData {
    fn set_raw_connector_response(&mut self, response: Option<Secret<String>>) {
        self.raw_connector_response = response;
    }

    fn get_raw_connector_response(&self) -> Option<Secret<String>> {
        self.raw_connector_response.clone()
    }

    fn set_raw_connector_request(&mut self, request: Option<Secret<String>>) {
        self.raw_connector_request = request;
    }

    fn get_raw_connector_request(&self) -> Option<Secret<String>> {
        self.raw_connector_request.clone()
    }
}

impl ConnectorResponseHeaders for RefundFlowData {
    fn set_connector_response_headers(&mut self, headers: Option<http::HeaderMap>) {
        self.connector_response_headers = headers;
    }

    fn get_connector_response_headers(&self) -> Option<&http::HeaderMap> {
        self.connector_response_headers.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct PaymentMethodTokenizationData<T: PaymentMethodDataTypes> {
    pub payment_method_data: PaymentMethodData<T>,
    pub browser_info: Option<BrowserInformation>,
    pub currency: Currency,
    pub amount: MinorUnit,
}

#[derive(Debug, Clone)]
pub struct PaymentMethodTokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub enum ResponseId {
    ConnectorTransactionId(String),
    EncodedData(String),
    #[default]
    NoResponseId,
}

impl ResponseId {
    pub fn get_connector_transaction_id(&self) -> CustomResult<String, errors::ValidationError> {
        match self {
            Self::ConnectorTransactionId(txn_id) => Ok(txn_id.to_string()),
            _ => Err(errors::ValidationError::IncorrectValueProvided {
                field_name: "connector_transaction_id",
            })
            .attach_printable("Expected connector transaction ID not found"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PaymentsResponseData {
    TransactionResponse {
        resource_id: ResponseId,
        connector_metadata: Option<serde_json::Value>,
        network_txn_id: Option<String>,
        connector_response_reference_id: Option<String>,
        status_code: u16,
    },
}

#[derive(Debug, Clone)]
pub struct RefundsResponseData {
    pub connector_refund_id: String,
    pub refund_status: common_enums::RefundStatus,
    pub status_code: u16,
}
