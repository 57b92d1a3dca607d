use common_enums::{enums, AttemptStatus, RefundStatus};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    pii::{self, Email},
    types::StringMajorUnit,
};
use domain_types::{
    connector_flow::{Authorize, Capture, PaymentMethodToken, Refund, Void},
    connector_types::{
        PaymentFlowData, PaymentMethodTokenResponse, PaymentMethodTokenizationData,
        PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData, PaymentsResponseData,
        RefundFlowData, RefundsData, RefundsResponseData, ResponseId,
    },
    errors,
    payment_method_data::{Card, PaymentMethodDataTypes, RawCardNumber},
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    utils::{self, is_payment_failure},
};
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};

use crate::types::ResponseRouterData;

/// Longest merchant reference the processor accepts as `trackingId`.
pub const MAX_TRACKING_ID_LENGTH: usize = 100;

// Auth

pub struct AlliedwalletAuthType {
    pub(super) token: Secret<String>,
    pub(super) merchant_id: Secret<String>,
    pub(super) site_id: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for AlliedwalletAuthType {
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::SignatureKey {
                api_key,
                key1,
                api_secret,
            } => Ok(Self {
                token: api_key.to_owned(),
                merchant_id: key1.to_owned(),
                site_id: api_secret.to_owned(),
            }),
            _ => Err(errors::ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

pub struct AlliedwalletRouterData<T> {
    pub amount: StringMajorUnit,
    pub router_data: T,
}

impl<T> TryFrom<(StringMajorUnit, T)> for AlliedwalletRouterData<T> {
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from((amount, item): (StringMajorUnit, T)) -> Result<Self, Self::Error> {
        Ok(Self {
            amount,
            router_data: item,
        })
    }
}

fn get_tracking_id(
    flow_data: &PaymentFlowData,
) -> Result<String, error_stack::Report<errors::ConnectorError>> {
    let tracking_id = flow_data.connector_request_reference_id.clone();
    if tracking_id.len() > MAX_TRACKING_ID_LENGTH {
        return Err(errors::ConnectorError::MaxFieldLengthViolated {
            connector: "alliedwallet".to_string(),
            field_name: "trackingId".to_string(),
            max_length: MAX_TRACKING_ID_LENGTH,
            received_length: tracking_id.len(),
        }
        .into());
    }
    Ok(tracking_id)
}

fn get_name_on_card<T: PaymentMethodDataTypes>(
    card: &Card<T>,
    flow_data: &PaymentFlowData,
) -> Result<Secret<String>, error_stack::Report<errors::ConnectorError>> {
    card.card_holder_name
        .clone()
        .or_else(|| flow_data.get_optional_billing_full_name())
        .ok_or_else(utils::missing_field_err("card_holder_name"))
}

// Requests

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlliedwalletCardPaymentsRequest<T: PaymentMethodDataTypes> {
    pub site_id: Secret<String>,
    pub amount: StringMajorUnit,
    pub currency: enums::Currency,
    pub tracking_id: String,
    pub name_on_card: Secret<String>,
    pub card_number: RawCardNumber<T>,
    pub expiration_month: Secret<i8>,
    pub expiration_year: Secret<i32>,
    #[serde(rename = "cVVCode")]
    pub cvv_code: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<enums::CountryAlpha2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<Secret<String>>,
    #[serde(rename = "iPAddress", skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<Secret<String, pii::IpAddress>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlliedwalletTokenPaymentsRequest {
    pub site_id: Secret<String>,
    pub quick_pay_token: Secret<String>,
    pub amount: StringMajorUnit,
    pub currency: enums::Currency,
    pub tracking_id: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AlliedwalletPaymentsRequest<T: PaymentMethodDataTypes> {
    Card(Box<AlliedwalletCardPaymentsRequest<T>>),
    Token(AlliedwalletTokenPaymentsRequest),
}

impl<T: PaymentMethodDataTypes + std::fmt::Debug + Sync + Send + 'static + Serialize>
    TryFrom<
        &AlliedwalletRouterData<
            &RouterDataV2<
                Authorize,
                PaymentFlowData,
                PaymentsAuthorizeData<T>,
                PaymentsResponseData,
            >,
        >,
    > for AlliedwalletPaymentsRequest<T>
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: &AlliedwalletRouterData<
            &RouterDataV2<
                Authorize,
                PaymentFlowData,
                PaymentsAuthorizeData<T>,
                PaymentsResponseData,
            >,
        >,
    ) -> Result<Self, Self::Error> {
        let router_data = item.router_data;
        let auth = AlliedwalletAuthType::try_from(&router_data.connector_auth_type)?;
        let tracking_id = get_tracking_id(&router_data.resource_common_data)?;
        match router_data
            .resource_common_data
            .get_optional_payment_method_token()
        {
            Some(token) => Ok(Self::Token(AlliedwalletTokenPaymentsRequest {
                site_id: auth.site_id,
                quick_pay_token: token,
                amount: item.amount.clone(),
                currency: router_data.request.currency,
                tracking_id,
            })),
            None => {
                let card = utils::get_card_details(
                    router_data.request.payment_method_data.clone(),
                    "alliedwallet",
                )?;
                Ok(Self::Card(Box::new(AlliedwalletCardPaymentsRequest {
                    site_id: auth.site_id,
                    amount: item.amount.clone(),
                    currency: router_data.request.currency,
                    tracking_id,
                    name_on_card: get_name_on_card(&card, &router_data.resource_common_data)?,
                    card_number: card.card_number.clone(),
                    expiration_month: card.get_expiry_month_as_i8()?,
                    expiration_year: card.get_expiry_year_as_i32()?,
                    cvv_code: card.card_cvc.clone(),
                    email: router_data.request.get_optional_email().or_else(|| {
                        router_data.resource_common_data.get_optional_billing_email()
                    }),
                    phone: router_data
                        .resource_common_data
                        .get_optional_billing_phone_number(),
                    first_name: router_data
                        .resource_common_data
                        .get_optional_billing_first_name(),
                    last_name: router_data
                        .resource_common_data
                        .get_optional_billing_last_name(),
                    address_line1: router_data
                        .resource_common_data
                        .get_optional_billing_line1(),
                    address_line2: router_data
                        .resource_common_data
                        .get_optional_billing_line2(),
                    city: router_data.resource_common_data.get_optional_billing_city(),
                    state: router_data
                        .resource_common_data
                        .get_optional_billing_state(),
                    country_id: router_data
                        .resource_common_data
                        .get_optional_billing_country(),
                    postal_code: router_data.resource_common_data.get_optional_billing_zip(),
                    ip_address: router_data.request.get_ip_address_as_optional(),
                })))
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlliedwalletCaptureRequest {
    pub authorize_transaction_id: String,
    pub amount: StringMajorUnit,
}

impl
    TryFrom<
        &AlliedwalletRouterData<
            &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    > for AlliedwalletCaptureRequest
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: &AlliedwalletRouterData<
            &RouterDataV2<Capture, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            authorize_transaction_id: item.router_data.request.get_connector_transaction_id()?,
            amount: item.amount.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlliedwalletRefundRequest {
    pub sale_transaction_id: String,
    pub amount: StringMajorUnit,
}

impl
    TryFrom<
        &AlliedwalletRouterData<
            &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    > for AlliedwalletRefundRequest
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: &AlliedwalletRouterData<
            &RouterDataV2<Refund, RefundFlowData, RefundsData, RefundsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            sale_transaction_id: item.router_data.request.connector_transaction_id.clone(),
            amount: item.amount.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlliedwalletVoidRequest {
    pub sale_transaction_id: String,
}

impl TryFrom<&RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>>
    for AlliedwalletVoidRequest
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: &RouterDataV2<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            sale_transaction_id: item.request.connector_transaction_id.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlliedwalletTokenizeRequest<T: PaymentMethodDataTypes> {
    pub site_id: Secret<String>,
    pub name_on_card: Secret<String>,
    pub card_number: RawCardNumber<T>,
    pub expiration_month: Secret<i8>,
    pub expiration_year: Secret<i32>,
    #[serde(rename = "cVVCode")]
    pub cvv_code: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<enums::CountryAlpha2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<Secret<String>>,
}

impl<T: PaymentMethodDataTypes + std::fmt::Debug + Sync + Send + 'static + Serialize>
    TryFrom<
        &RouterDataV2<
            PaymentMethodToken,
            PaymentFlowData,
            PaymentMethodTokenizationData<T>,
            PaymentMethodTokenResponse,
        >,
    > for AlliedwalletTokenizeRequest<T>
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: &RouterDataV2<
            PaymentMethodToken,
            PaymentFlowData,
            PaymentMethodTokenizationData<T>,
            PaymentMethodTokenResponse,
        >,
    ) -> Result<Self, Self::Error> {
        let auth = AlliedwalletAuthType::try_from(&item.connector_auth_type)?;
        let card =
            utils::get_card_details(item.request.payment_method_data.clone(), "alliedwallet")?;
        Ok(Self {
            site_id: auth.site_id,
            name_on_card: get_name_on_card(&card, &item.resource_common_data)?,
            card_number: card.card_number.clone(),
            expiration_month: card.get_expiry_month_as_i8()?,
            expiration_year: card.get_expiry_year_as_i32()?,
            cvv_code: card.card_cvc.clone(),
            email: item.resource_common_data.get_optional_billing_email(),
            phone: item
                .resource_common_data
                .get_optional_billing_phone_number(),
            first_name: item.resource_common_data.get_optional_billing_first_name(),
            last_name: item.resource_common_data.get_optional_billing_last_name(),
            address_line1: item.resource_common_data.get_optional_billing_line1(),
            address_line2: item.resource_common_data.get_optional_billing_line2(),
            city: item.resource_common_data.get_optional_billing_city(),
            state: item.resource_common_data.get_optional_billing_state(),
            country_id: item.resource_common_data.get_optional_billing_country(),
            postal_code: item.resource_common_data.get_optional_billing_zip(),
        })
    }
}

// Responses

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AlliedwalletTransactionState {
    Successful,
    #[serde(other)]
    Declined,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlliedwalletPaymentsResponse {
    pub id: Option<String>,
    pub state: Option<AlliedwalletTransactionState>,
    pub status: Option<AlliedwalletTransactionState>,
    pub message: Option<String>,
}

impl AlliedwalletPaymentsResponse {
    /// The processor spells the state field `state` on some endpoints and
    /// `status` on others.
    pub fn transaction_state(&self) -> AlliedwalletTransactionState {
        self.state
            .or(self.status)
            .unwrap_or(AlliedwalletTransactionState::Declined)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlliedwalletRefundResponse {
    pub id: Option<String>,
    pub state: Option<AlliedwalletTransactionState>,
    pub status: Option<AlliedwalletTransactionState>,
    pub message: Option<String>,
}

impl AlliedwalletRefundResponse {
    pub fn transaction_state(&self) -> AlliedwalletTransactionState {
        self.state
            .or(self.status)
            .unwrap_or(AlliedwalletTransactionState::Declined)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlliedwalletTokenResponse {
    pub id: Option<String>,
    pub state: Option<AlliedwalletTransactionState>,
    pub status: Option<AlliedwalletTransactionState>,
    pub message: Option<String>,
}

impl AlliedwalletTokenResponse {
    pub fn transaction_state(&self) -> AlliedwalletTransactionState {
        self.state
            .or(self.status)
            .unwrap_or(AlliedwalletTransactionState::Declined)
    }
}

fn build_payments_router_data<F, Req>(
    status: AttemptStatus,
    response: AlliedwalletPaymentsResponse,
    router_data: RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    http_code: u16,
) -> Result<
    RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>,
    error_stack::Report<errors::ConnectorError>,
> {
    let response_result = if is_payment_failure(status) {
        Err(ErrorResponse {
            status_code: http_code,
            code: NO_ERROR_CODE.to_string(),
            message: response
                .message
                .clone()
                .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
            reason: response.message.clone(),
            attempt_status: Some(status),
            connector_transaction_id: response.id.clone(),
            network_advice_code: None,
            network_decline_code: None,
            network_error_message: None,
        })
    } else {
        Ok(PaymentsResponseData::TransactionResponse {
            resource_id: response
                .id
                .clone()
                .map_or(ResponseId::NoResponseId, ResponseId::ConnectorTransactionId),
            connector_metadata: None,
            network_txn_id: None,
            connector_response_reference_id: response.id,
            status_code: http_code,
        })
    };
    Ok(RouterDataV2 {
        response: response_result,
        resource_common_data: PaymentFlowData {
            status,
            ..router_data.resource_common_data
        },
        ..router_data
    })
}

impl<F, T: PaymentMethodDataTypes + std::fmt::Debug + Sync + Send + 'static + Serialize>
    TryFrom<ResponseRouterData<AlliedwalletPaymentsResponse, Self>>
    for RouterDataV2<F, PaymentFlowData, PaymentsAuthorizeData<T>, PaymentsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: ResponseRouterData<AlliedwalletPaymentsResponse, Self>,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let status = match response.transaction_state() {
            AlliedwalletTransactionState::Successful => {
                if router_data.request.is_auto_capture()? {
                    AttemptStatus::Charged
                } else {
                    AttemptStatus::Authorized
                }
            }
            AlliedwalletTransactionState::Declined => {
                if router_data.request.is_auto_capture()? {
                    AttemptStatus::Failure
                } else {
                    AttemptStatus::AuthorizationFailed
                }
            }
        };
        build_payments_router_data(status, response, router_data, http_code)
    }
}

impl<F> TryFrom<ResponseRouterData<AlliedwalletPaymentsResponse, Self>>
    for RouterDataV2<F, PaymentFlowData, PaymentsCaptureData, PaymentsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: ResponseRouterData<AlliedwalletPaymentsResponse, Self>,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let status = match response.transaction_state() {
            AlliedwalletTransactionState::Successful => AttemptStatus::Charged,
            AlliedwalletTransactionState::Declined => AttemptStatus::CaptureFailed,
        };
        build_payments_router_data(status, response, router_data, http_code)
    }
}

impl<F> TryFrom<ResponseRouterData<AlliedwalletPaymentsResponse, Self>>
    for RouterDataV2<F, PaymentFlowData, PaymentVoidData, PaymentsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: ResponseRouterData<AlliedwalletPaymentsResponse, Self>,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let status = match response.transaction_state() {
            AlliedwalletTransactionState::Successful => AttemptStatus::Voided,
            AlliedwalletTransactionState::Declined => AttemptStatus::VoidFailed,
        };
        build_payments_router_data(status, response, router_data, http_code)
    }
}

impl<F> TryFrom<ResponseRouterData<AlliedwalletRefundResponse, Self>>
    for RouterDataV2<F, RefundFlowData, RefundsData, RefundsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: ResponseRouterData<AlliedwalletRefundResponse, Self>,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let refund_status = match response.transaction_state() {
            AlliedwalletTransactionState::Successful => RefundStatus::Success,
            AlliedwalletTransactionState::Declined => RefundStatus::Failure,
        };
        let response_result = if refund_status == RefundStatus::Failure {
            Err(ErrorResponse {
                status_code: http_code,
                code: NO_ERROR_CODE.to_string(),
                message: response
                    .message
                    .clone()
                    .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                reason: response.message.clone(),
                attempt_status: None,
                connector_transaction_id: response.id.clone(),
                network_advice_code: None,
                network_decline_code: None,
                network_error_message: None,
            })
        } else {
            Ok(RefundsResponseData {
                connector_refund_id: response
                    .id
                    .clone()
                    .ok_or(errors::ConnectorError::MissingConnectorTransactionID)?,
                refund_status,
                status_code: http_code,
            })
        };
        Ok(Self {
            response: response_result,
            resource_common_data: RefundFlowData {
                status: refund_status,
                ..router_data.resource_common_data
            },
            ..router_data
        })
    }
}

impl<F, T: PaymentMethodDataTypes + std::fmt::Debug + Sync + Send + 'static + Serialize>
    TryFrom<ResponseRouterData<AlliedwalletTokenResponse, Self>>
    for RouterDataV2<
        F,
        PaymentFlowData,
        PaymentMethodTokenizationData<T>,
        PaymentMethodTokenResponse,
    >
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: ResponseRouterData<AlliedwalletTokenResponse, Self>,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            router_data,
            http_code,
        } = item;
        let response_result = match response.transaction_state() {
            AlliedwalletTransactionState::Successful => Ok(PaymentMethodTokenResponse {
                token: response
                    .id
                    .clone()
                    .ok_or(errors::ConnectorError::MissingConnectorTransactionID)?,
            }),
            AlliedwalletTransactionState::Declined => Err(ErrorResponse {
                status_code: http_code,
                code: NO_ERROR_CODE.to_string(),
                message: response
                    .message
                    .clone()
                    .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                reason: response.message,
                attempt_status: None,
                connector_transaction_id: None,
                network_advice_code: None,
                network_decline_code: None,
                network_error_message: None,
            }),
        };
        Ok(Self {
            response: response_result,
            resource_common_data: PaymentFlowData {
                connector_http_status_code: Some(http_code),
                ..router_data.resource_common_data
            },
            ..router_data
        })
    }
}

// Error

#[derive(Debug, Serialize, Deserialize)]
pub struct AlliedwalletErrorResponse {
    pub message: Option<String>,
}
