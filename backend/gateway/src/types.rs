//! Typed requests and responses crossing the gateway boundary, and the
//! conversions from settled router data into them.

use common_enums::{AttemptStatus, Currency, RefundStatus};
use common_utils::{pii::Email, types::MinorUnit};
use domain_types::{
    connector_flow::{PaymentMethodToken, Refund},
    connector_types::{
        PaymentFlowData, PaymentMethodTokenResponse, PaymentMethodTokenizationData,
        PaymentsResponseData, RefundFlowData, RefundsData, RefundsResponseData, ResponseId,
    },
    payment_address::Address,
    payment_method_data::{Card, DefaultPCIHolder, PaymentMethodDataTypes, RawCardNumber},
    router_data_v2::RouterDataV2,
};
use hyperswitch_masking::Secret;
use serde::Serialize;

/// Card details collected from the payer.
#[derive(Debug, Clone, Serialize)]
pub struct CardDetails {
    pub number: cards::CardNumber,
    pub exp_month: Secret<String>,
    /// Two or four digit expiry year.
    pub exp_year: Secret<String>,
    pub cvc: Secret<String>,
    pub holder_name: Option<Secret<String>>,
}

impl From<CardDetails> for Card<DefaultPCIHolder> {
    fn from(card: CardDetails) -> Self {
        Self {
            card_number: RawCardNumber(card.number),
            card_exp_month: card.exp_month,
            card_exp_year: card.exp_year,
            card_cvc: card.cvc,
            card_issuer: None,
            card_network: None,
            card_type: None,
            card_issuing_country: None,
            bank_code: None,
            nick_name: None,
            card_holder_name: card.holder_name,
        }
    }
}

/// One payment to run against the processor.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    /// Amount in the minor unit of `currency`.
    pub amount: MinorUnit,
    pub currency: Currency,
    /// Card to charge. Ignored when `token` is present.
    pub card: Option<CardDetails>,
    /// Stored QuickPay token from an earlier tokenization.
    pub token: Option<Secret<String>>,
    pub billing: Option<Address>,
    pub email: Option<Email>,
    pub ip_address: Option<std::net::IpAddr>,
    /// Merchant reference, sent to the processor as the tracking id.
    pub reference: Option<String>,
}

/// Capture of a previously authorized transaction.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureRequest {
    /// Transaction id returned by the authorize.
    pub transaction_id: String,
    pub amount: MinorUnit,
    pub currency: Currency,
    pub reference: Option<String>,
}

/// Void of a previously authorized transaction.
#[derive(Debug, Clone, Serialize)]
pub struct VoidRequest {
    pub transaction_id: String,
    pub reference: Option<String>,
}

/// Full or partial refund of a settled transaction.
#[derive(Debug, Clone, Serialize)]
pub struct RefundRequest {
    pub transaction_id: String,
    /// Amount to refund; may be lower than the settled amount.
    pub amount: MinorUnit,
    pub currency: Currency,
    pub reference: Option<String>,
}

/// Card to exchange for a reusable QuickPay token.
#[derive(Debug, Clone, Serialize)]
pub struct TokenizeRequest {
    pub card: CardDetails,
    pub billing: Option<Address>,
}

/// Error details carried on a declined or failed operation.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    pub reason: Option<String>,
}

impl ErrorDetails {
    fn from_error_response(err: &domain_types::router_data::ErrorResponse) -> Self {
        Self {
            code: err.code.clone(),
            message: err.message.clone(),
            reason: err.reason.clone(),
        }
    }
}

/// Outcome of a payment-shaped flow (authorize, capture, void).
///
/// A processor decline is a regular response: `status` holds the failure
/// status and `error` the processor's reason.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub transaction_id: Option<String>,
    pub status: AttemptStatus,
    /// Processor-side reference for this transaction.
    pub reference: Option<String>,
    pub network_txn_id: Option<String>,
    pub error: Option<ErrorDetails>,
    pub status_code: u16,
}

/// Outcome of a refund.
#[derive(Debug, Clone, Serialize)]
pub struct RefundResponse {
    pub refund_id: Option<String>,
    pub status: RefundStatus,
    pub error: Option<ErrorDetails>,
    pub status_code: u16,
}

/// Outcome of a card tokenization.
#[derive(Debug, Clone, Serialize)]
pub struct TokenizeResponse {
    pub token: Option<String>,
    pub error: Option<ErrorDetails>,
    pub status_code: u16,
}

/// Convert settled payment router data into the gateway response.
///
/// Shared by authorize, capture and void; the flow only influences the
/// statuses the connector has already written into the data.
pub fn generate_payment_response<F, Req>(
    router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
) -> PaymentResponse {
    let flow_status = router_data.resource_common_data.status;
    match router_data.response {
        Ok(PaymentsResponseData::TransactionResponse {
            resource_id,
            network_txn_id,
            connector_response_reference_id,
            status_code,
            ..
        }) => PaymentResponse {
            transaction_id: match resource_id {
                ResponseId::ConnectorTransactionId(id) | ResponseId::EncodedData(id) => Some(id),
                ResponseId::NoResponseId => None,
            },
            status: flow_status,
            reference: connector_response_reference_id,
            network_txn_id,
            error: None,
            status_code,
        },
        Err(err) => {
            let status = err
                .get_attempt_status_for_response(err.status_code, flow_status)
                .unwrap_or(flow_status);
            PaymentResponse {
                transaction_id: err.connector_transaction_id.clone(),
                status,
                reference: err.connector_transaction_id.clone(),
                network_txn_id: None,
                error: Some(ErrorDetails::from_error_response(&err)),
                status_code: err.status_code,
            }
        }
    }
}

/// Convert settled refund router data into the gateway response.
pub fn generate_refund_response(
    router_data: RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
) -> RefundResponse {
    let flow_status = router_data.resource_common_data.status;
    match router_data.response {
        Ok(response) => RefundResponse {
            refund_id: Some(response.connector_refund_id),
            status: response.refund_status,
            error: None,
            status_code: response.status_code,
        },
        Err(err) => RefundResponse {
            refund_id: err.connector_transaction_id.clone(),
            status: flow_status,
            error: Some(ErrorDetails::from_error_response(&err)),
            status_code: err.status_code,
        },
    }
}

/// Convert settled tokenization router data into the gateway response.
pub fn generate_tokenize_response<T: PaymentMethodDataTypes>(
    router_data: RouterDataV2<
        PaymentMethodToken,
        PaymentFlowData,
        PaymentMethodTokenizationData<T>,
        PaymentMethodTokenResponse,
    >,
) -> TokenizeResponse {
    let status_code = router_data.resource_common_data.connector_http_status_code;
    match router_data.response {
        Ok(response) => TokenizeResponse {
            token: Some(response.token),
            error: None,
            status_code: status_code.unwrap_or(200),
        },
        Err(err) => TokenizeResponse {
            token: None,
            error: Some(ErrorDetails::from_error_response(&err)),
            status_code: err.status_code,
        },
    }
}
