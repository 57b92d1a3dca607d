//! The AlliedWallet gateway facade: validates framework-shaped requests,
//! drives the connector flow for each transaction type and converts the
//! settled router data back into gateway responses.

use std::marker::PhantomData;

use common_enums::{
    AttemptStatus, AuthenticationType, CaptureMethod, Currency, PaymentMethod, RefundStatus,
};
use common_utils::{
    events::{Event, EventStage, FlowName},
    generate_time_ordered_id,
    id_type::MerchantId,
    types::MinorUnit,
    CustomResult,
};
use connector_integration::{
    connectors::alliedwallet::transformers::MAX_TRACKING_ID_LENGTH, types::ConnectorData,
};
use domain_types::{
    connector_flow::{Authorize, Capture, PaymentMethodToken, Refund, Void},
    connector_types::{
        ConnectorEnum, PaymentFlowData, PaymentMethodTokenResponse, PaymentMethodTokenizationData,
        PaymentVoidData, PaymentsAuthorizeData, PaymentsCaptureData, PaymentsResponseData,
        RefundFlowData, RefundsData, RefundsResponseData, ResponseId,
    },
    errors::{ApiError, ApplicationErrorResponse, ConnectorError},
    payment_address::PaymentAddress,
    payment_method_data::{CardToken, DefaultPCIHolder, PaymentMethodData},
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_request_types::BrowserInformation,
};
use error_stack::Report;
use hyperswitch_masking::{PeekInterface, Secret};
use interfaces::connector_integration_v2::BoxedConnectorIntegrationV2;

use crate::{
    configs::GatewayConfig,
    error::ReportSwitchExt,
    types::{
        generate_payment_response, generate_refund_response, generate_tokenize_response,
        CaptureRequest, PaymentRequest, PaymentResponse, RefundRequest, RefundResponse,
        TokenizeRequest, TokenizeResponse, VoidRequest,
    },
};

/// Merchant credentials for the AlliedWallet API.
#[derive(Clone, Debug)]
pub struct GatewayCredentials {
    /// Merchant id, a path segment of every processor endpoint.
    pub merchant_id: Secret<String>,
    /// Site id, sent in payment and tokenization bodies.
    pub site_id: Secret<String>,
    /// OAuth bearer token.
    pub token: Secret<String>,
}

/// Facade over the AlliedWallet connector. One instance per merchant.
#[derive(Clone)]
pub struct AlliedwalletGateway {
    config: GatewayConfig,
    credentials: GatewayCredentials,
}

impl AlliedwalletGateway {
    pub fn new(config: GatewayConfig, credentials: GatewayCredentials) -> Self {
        Self {
            config,
            credentials,
        }
    }

    /// Sale: authorize and capture in one step.
    ///
    /// A processor decline comes back as `Ok` with
    /// [`PaymentResponse::error`] populated; only transport and mapping
    /// problems surface as `Err`.
    pub async fn purchase(
        &self,
        request: PaymentRequest,
    ) -> CustomResult<PaymentResponse, ApplicationErrorResponse> {
        self.execute_payment(request, CaptureMethod::Automatic, "purchase")
            .await
    }

    /// Authorize only; settle later with [`AlliedwalletGateway::capture`].
    pub async fn authorize(
        &self,
        request: PaymentRequest,
    ) -> CustomResult<PaymentResponse, ApplicationErrorResponse> {
        self.execute_payment(request, CaptureMethod::Manual, "authorize")
            .await
    }

    /// Capture a previously authorized transaction.
    pub async fn capture(
        &self,
        request: CaptureRequest,
    ) -> CustomResult<PaymentResponse, ApplicationErrorResponse> {
        let connector = ConnectorEnum::Alliedwallet;
        let connector_data = ConnectorData::<DefaultPCIHolder>::get_connector_by_name(&connector);
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Capture,
            PaymentFlowData,
            PaymentsCaptureData,
            PaymentsResponseData,
        > = connector_data.connector.get_connector_integration_v2();

        let payment_flow_data = self.payment_flow_data(request.reference.as_deref(), None, None);
        let capture_data = PaymentsCaptureData {
            amount_to_capture: request.amount.get_amount_as_i64(),
            minor_amount_to_capture: request.amount,
            currency: request.currency,
            connector_transaction_id: ResponseId::ConnectorTransactionId(
                request.transaction_id.clone(),
            ),
            browser_info: None,
            capture_method: None,
            merchant_order_reference_id: request.reference.clone(),
        };

        let router_data = RouterDataV2::<
            Capture,
            PaymentFlowData,
            PaymentsCaptureData,
            PaymentsResponseData,
        > {
            flow: PhantomData,
            resource_common_data: payment_flow_data,
            connector_auth_type: self.auth_type(),
            request: capture_data,
            response: Err(ErrorResponse::default()),
        };

        let mut event = Event::new(
            generate_time_ordered_id("req"),
            FlowName::Capture,
            &connector.to_string(),
            EventStage::GatewayRequest,
        );
        event.add_reference_id(Some(request.transaction_id.as_str()));
        event.set_request_data(&request);

        let start = std::time::Instant::now();
        let result = external_services::service::execute_connector_processing_step(
            &self.config.proxy,
            connector_integration,
            router_data,
            None,
            &connector.to_string(),
            "capture",
        )
        .await;
        event.latency_ms = Some(elapsed_ms(start));

        match result {
            Ok(router_data) => {
                let response = generate_payment_response(router_data);
                event.status_code = Some(response.status_code);
                event.set_connector_response(&response);
                event.emit();
                Ok(response)
            }
            Err(error_report) => {
                event.emit();
                Err(error_report).switch()
            }
        }
    }

    /// Void a previously authorized transaction.
    pub async fn void(
        &self,
        request: VoidRequest,
    ) -> CustomResult<PaymentResponse, ApplicationErrorResponse> {
        let connector = ConnectorEnum::Alliedwallet;
        let connector_data = ConnectorData::<DefaultPCIHolder>::get_connector_by_name(&connector);
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Void,
            PaymentFlowData,
            PaymentVoidData,
            PaymentsResponseData,
        > = connector_data.connector.get_connector_integration_v2();

        let payment_flow_data = self.payment_flow_data(request.reference.as_deref(), None, None);
        let void_data = PaymentVoidData {
            connector_transaction_id: request.transaction_id.clone(),
            cancellation_reason: None,
            browser_info: None,
            amount: None,
            currency: None,
        };

        let router_data =
            RouterDataV2::<Void, PaymentFlowData, PaymentVoidData, PaymentsResponseData> {
                flow: PhantomData,
                resource_common_data: payment_flow_data,
                connector_auth_type: self.auth_type(),
                request: void_data,
                response: Err(ErrorResponse::default()),
            };

        let mut event = Event::new(
            generate_time_ordered_id("req"),
            FlowName::Void,
            &connector.to_string(),
            EventStage::GatewayRequest,
        );
        event.add_reference_id(Some(request.transaction_id.as_str()));
        event.set_request_data(&request);

        let start = std::time::Instant::now();
        let result = external_services::service::execute_connector_processing_step(
            &self.config.proxy,
            connector_integration,
            router_data,
            None,
            &connector.to_string(),
            "void",
        )
        .await;
        event.latency_ms = Some(elapsed_ms(start));

        match result {
            Ok(router_data) => {
                let response = generate_payment_response(router_data);
                event.status_code = Some(response.status_code);
                event.set_connector_response(&response);
                event.emit();
                Ok(response)
            }
            Err(error_report) => {
                event.emit();
                Err(error_report).switch()
            }
        }
    }

    /// Refund a settled transaction, fully or partially.
    pub async fn refund(
        &self,
        request: RefundRequest,
    ) -> CustomResult<RefundResponse, ApplicationErrorResponse> {
        let connector = ConnectorEnum::Alliedwallet;
        let connector_data = ConnectorData::<DefaultPCIHolder>::get_connector_by_name(&connector);
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Refund,
            RefundFlowData,
            RefundsData,
            RefundsResponseData,
        > = connector_data.connector.get_connector_integration_v2();

        let refund_id = generate_time_ordered_id("ref");
        let refund_flow_data = self.refund_flow_data(request.reference.as_deref(), &refund_id);
        let refund_data = RefundsData {
            refund_id,
            connector_transaction_id: request.transaction_id.clone(),
            currency: request.currency,
            payment_amount: request.amount.get_amount_as_i64(),
            reason: None,
            refund_amount: request.amount.get_amount_as_i64(),
            minor_payment_amount: request.amount,
            minor_refund_amount: request.amount,
            refund_status: RefundStatus::Pending,
            capture_method: None,
            browser_info: None,
        };

        let router_data =
            RouterDataV2::<Refund, RefundFlowData, RefundsData, RefundsResponseData> {
                flow: PhantomData,
                resource_common_data: refund_flow_data,
                connector_auth_type: self.auth_type(),
                request: refund_data,
                response: Err(ErrorResponse::default()),
            };

        let mut event = Event::new(
            generate_time_ordered_id("req"),
            FlowName::Refund,
            &connector.to_string(),
            EventStage::GatewayRequest,
        );
        event.add_reference_id(Some(request.transaction_id.as_str()));
        event.set_request_data(&request);

        let start = std::time::Instant::now();
        let result = external_services::service::execute_connector_processing_step(
            &self.config.proxy,
            connector_integration,
            router_data,
            None,
            &connector.to_string(),
            "refund",
        )
        .await;
        event.latency_ms = Some(elapsed_ms(start));

        match result {
            Ok(router_data) => {
                let response = generate_refund_response(router_data);
                event.status_code = Some(response.status_code);
                event.set_connector_response(&response);
                event.emit();
                Ok(response)
            }
            Err(error_report) => {
                event.emit();
                Err(error_report).switch()
            }
        }
    }

    /// Exchange card details for a reusable QuickPay token.
    pub async fn create_card(
        &self,
        request: TokenizeRequest,
    ) -> CustomResult<TokenizeResponse, ApplicationErrorResponse> {
        let connector = ConnectorEnum::Alliedwallet;
        let connector_data = ConnectorData::<DefaultPCIHolder>::get_connector_by_name(&connector);

        let payment_flow_data = self.payment_flow_data(None, request.billing.clone(), None);
        let tokenization_data = PaymentMethodTokenizationData {
            payment_method_data: PaymentMethodData::Card(request.card.clone().into()),
            browser_info: None,
            currency: Currency::default(),
            amount: MinorUnit::new(0),
        };

        let mut event = Event::new(
            generate_time_ordered_id("req"),
            FlowName::PaymentMethodToken,
            &connector.to_string(),
            EventStage::GatewayRequest,
        );
        event.set_request_data(&request);

        let start = std::time::Instant::now();
        let result = self
            .run_tokenize(
                &payment_flow_data,
                tokenization_data,
                &connector_data,
                "create_card",
            )
            .await;
        event.latency_ms = Some(elapsed_ms(start));

        match result {
            Ok(router_data) => {
                let response = generate_tokenize_response(router_data);
                event.status_code = Some(response.status_code);
                event.set_connector_response(&response);
                event.emit();
                Ok(response)
            }
            Err(error_report) => {
                event.emit();
                Err(error_report).switch()
            }
        }
    }

    async fn execute_payment(
        &self,
        request: PaymentRequest,
        capture_method: CaptureMethod,
        service_name: &str,
    ) -> CustomResult<PaymentResponse, ApplicationErrorResponse> {
        validate_payment_request(&request)?;

        let connector = ConnectorEnum::Alliedwallet;
        let connector_data = ConnectorData::<DefaultPCIHolder>::get_connector_by_name(&connector);
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            Authorize,
            PaymentFlowData,
            PaymentsAuthorizeData<DefaultPCIHolder>,
            PaymentsResponseData,
        > = connector_data.connector.get_connector_integration_v2();

        let payment_flow_data = self.payment_flow_data(
            request.reference.as_deref(),
            request.billing.clone(),
            request.token.clone(),
        );
        let payment_authorize_data = PaymentsAuthorizeData {
            payment_method_data: payment_method_data(&request)?,
            amount: request.amount,
            email: request.email.clone(),
            customer_name: None,
            currency: request.currency,
            confirm: true,
            capture_method: Some(capture_method),
            browser_info: request.ip_address.map(|ip_address| BrowserInformation {
                ip_address: Some(ip_address),
                ..Default::default()
            }),
            payment_method_type: None,
            customer_id: None,
            metadata: None,
            minor_amount: request.amount,
            merchant_order_reference_id: request.reference.clone(),
        };

        let should_do_payment_method_token =
            connector_data.connector.should_do_payment_method_token(
                payment_flow_data.payment_method,
                payment_authorize_data.payment_method_type,
            );

        let payment_flow_data = if should_do_payment_method_token {
            let tokenization_data = PaymentMethodTokenizationData {
                payment_method_data: payment_authorize_data.payment_method_data.clone(),
                browser_info: payment_authorize_data.browser_info.clone(),
                currency: request.currency,
                amount: request.amount,
            };
            let token = self
                .tokenize_payment_method(
                    &payment_flow_data,
                    tokenization_data,
                    &connector_data,
                    service_name,
                )
                .await?;
            tracing::info!("payment method token created");
            payment_flow_data.set_payment_method_token(Some(token))
        } else {
            payment_flow_data
        };

        let router_data = RouterDataV2::<
            Authorize,
            PaymentFlowData,
            PaymentsAuthorizeData<DefaultPCIHolder>,
            PaymentsResponseData,
        > {
            flow: PhantomData,
            resource_common_data: payment_flow_data,
            connector_auth_type: self.auth_type(),
            request: payment_authorize_data,
            response: Err(ErrorResponse::default()),
        };

        let mut event = Event::new(
            generate_time_ordered_id("req"),
            FlowName::Authorize,
            &connector.to_string(),
            EventStage::GatewayRequest,
        );
        event.add_reference_id(request.reference.as_deref());
        event.set_request_data(&request);

        let start = std::time::Instant::now();
        let result = external_services::service::execute_connector_processing_step(
            &self.config.proxy,
            connector_integration,
            router_data,
            None,
            &connector.to_string(),
            service_name,
        )
        .await;
        event.latency_ms = Some(elapsed_ms(start));

        match result {
            Ok(router_data) => {
                let response = generate_payment_response(router_data);
                event.status_code = Some(response.status_code);
                event.set_connector_response(&response);
                event.emit();
                Ok(response)
            }
            Err(error_report) => {
                event.emit();
                Err(error_report).switch()
            }
        }
    }

    /// Run the tokenization flow and hand back the token, for connectors
    /// that require a payment method token ahead of the payment itself.
    async fn tokenize_payment_method(
        &self,
        payment_flow_data: &PaymentFlowData,
        tokenization_data: PaymentMethodTokenizationData<DefaultPCIHolder>,
        connector_data: &ConnectorData<DefaultPCIHolder>,
        service_name: &str,
    ) -> CustomResult<String, ApplicationErrorResponse> {
        let router_data = self
            .run_tokenize(
                payment_flow_data,
                tokenization_data,
                connector_data,
                service_name,
            )
            .await
            .switch()?;
        match router_data.response {
            Ok(token_response) => Ok(token_response.token),
            Err(err) => Err(Report::new(ApplicationErrorResponse::InternalServerError(
                ApiError {
                    sub_code: "PAYMENT_METHOD_TOKEN_ERROR".to_string(),
                    error_identifier: 500,
                    error_message: err.message,
                    error_object: None,
                },
            ))),
        }
    }

    async fn run_tokenize(
        &self,
        payment_flow_data: &PaymentFlowData,
        tokenization_data: PaymentMethodTokenizationData<DefaultPCIHolder>,
        connector_data: &ConnectorData<DefaultPCIHolder>,
        service_name: &str,
    ) -> CustomResult<
        RouterDataV2<
            PaymentMethodToken,
            PaymentFlowData,
            PaymentMethodTokenizationData<DefaultPCIHolder>,
            PaymentMethodTokenResponse,
        >,
        ConnectorError,
    > {
        let connector_integration: BoxedConnectorIntegrationV2<
            'static,
            PaymentMethodToken,
            PaymentFlowData,
            PaymentMethodTokenizationData<DefaultPCIHolder>,
            PaymentMethodTokenResponse,
        > = connector_data.connector.get_connector_integration_v2();

        let router_data = RouterDataV2 {
            flow: PhantomData,
            resource_common_data: payment_flow_data.clone(),
            connector_auth_type: self.auth_type(),
            request: tokenization_data,
            response: Err(ErrorResponse::default()),
        };

        external_services::service::execute_connector_processing_step(
            &self.config.proxy,
            connector_integration,
            router_data,
            None,
            &connector_data.connector_name.to_string(),
            service_name,
        )
        .await
    }

    fn auth_type(&self) -> ConnectorAuthType {
        ConnectorAuthType::SignatureKey {
            api_key: self.credentials.token.clone(),
            key1: self.credentials.merchant_id.clone(),
            api_secret: self.credentials.site_id.clone(),
        }
    }

    fn payment_flow_data(
        &self,
        reference: Option<&str>,
        billing: Option<domain_types::payment_address::Address>,
        token: Option<Secret<String>>,
    ) -> PaymentFlowData {
        let payment_id = generate_time_ordered_id("pay");
        let attempt_id = generate_time_ordered_id("attempt");
        let connector_request_reference_id = reference
            .map(str::to_owned)
            .unwrap_or_else(|| payment_id.clone());
        PaymentFlowData {
            merchant_id: MerchantId::new_unchecked(self.credentials.merchant_id.peek().clone()),
            customer_id: None,
            payment_id,
            attempt_id,
            status: AttemptStatus::Pending,
            payment_method: PaymentMethod::Card,
            description: None,
            address: PaymentAddress::new(None, billing, None, None),
            auth_type: AuthenticationType::NoThreeDs,
            reference_id: reference.map(str::to_owned),
            payment_method_token: token.map(domain_types::router_data::PaymentMethodToken::Token),
            connector_request_reference_id,
            test_mode: None,
            connector_http_status_code: None,
            connector_response_headers: None,
            external_latency: None,
            connectors: self.config.connectors.clone(),
            raw_connector_response: None,
            raw_connector_request: None,
        }
    }

    fn refund_flow_data(&self, reference: Option<&str>, refund_id: &str) -> RefundFlowData {
        RefundFlowData {
            merchant_id: MerchantId::new_unchecked(self.credentials.merchant_id.peek().clone()),
            status: RefundStatus::Pending,
            refund_id: Some(refund_id.to_owned()),
            connectors: self.config.connectors.clone(),
            connector_request_reference_id: reference
                .map(str::to_owned)
                .unwrap_or_else(|| refund_id.to_owned()),
            raw_connector_response: None,
            connector_response_headers: None,
            raw_connector_request: None,
            test_mode: None,
            payment_method: Some(PaymentMethod::Card),
        }
    }
}

fn validate_payment_request(
    request: &PaymentRequest,
) -> CustomResult<(), ApplicationErrorResponse> {
    if let Some(reference) = request.reference.as_deref() {
        if reference.len() > MAX_TRACKING_ID_LENGTH {
            return Err(invalid_request(&format!(
                "reference must not exceed {MAX_TRACKING_ID_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Pick the payment method for the connector: a stored token wins over
/// raw card details.
fn payment_method_data(
    request: &PaymentRequest,
) -> CustomResult<PaymentMethodData<DefaultPCIHolder>, ApplicationErrorResponse> {
    if request.token.is_some() {
        Ok(PaymentMethodData::CardToken(CardToken {
            card_holder_name: request
                .card
                .as_ref()
                .and_then(|card| card.holder_name.clone()),
            card_cvc: None,
        }))
    } else {
        request
            .card
            .clone()
            .map(|card| PaymentMethodData::Card(card.into()))
            .ok_or_else(|| invalid_request("one of card or token is required"))
    }
}

fn invalid_request(message: &str) -> Report<ApplicationErrorResponse> {
    Report::new(ApplicationErrorResponse::BadRequest(ApiError {
        sub_code: "INVALID_REQUEST_DATA".to_string(),
        error_identifier: 400,
        error_message: message.to_string(),
        error_object: None,
    }))
}

fn elapsed_ms(start: std::time::Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use common_utils::consts::Env;
    use domain_types::types::{ConnectorParams, Connectors, Proxy};

    use super::*;
    use crate::{
        configs::Common,
        logger::config::{Level, Log, LogConsole, LogFormat},
        types::CardDetails,
    };

    fn gateway() -> AlliedwalletGateway {
        AlliedwalletGateway::new(
            GatewayConfig {
                common: Common {
                    environment: Env::Development,
                },
                log: Log {
                    console: LogConsole {
                        enabled: false,
                        level: Level::default(),
                        log_format: LogFormat::Json,
                        filtering_directive: None,
                    },
                },
                proxy: Proxy::default(),
                connectors: Connectors {
                    alliedwallet: ConnectorParams::new("https://api.alliedwallet.com/".to_string()),
                },
            },
            GatewayCredentials {
                merchant_id: Secret::new("merchant_123".to_string()),
                site_id: Secret::new("site_456".to_string()),
                token: Secret::new("bearer_token".to_string()),
            },
        )
    }

    fn card_request(token: Option<Secret<String>>) -> PaymentRequest {
        PaymentRequest {
            amount: MinorUnit::new(1599),
            currency: Currency::USD,
            card: Some(CardDetails {
                number: "4111111111111111".parse().unwrap(),
                exp_month: Secret::new("03".to_string()),
                exp_year: Secret::new("2030".to_string()),
                cvc: Secret::new("737".to_string()),
                holder_name: Some(Secret::new("John Doe".to_string())),
            }),
            token,
            billing: None,
            email: None,
            ip_address: None,
            reference: None,
        }
    }

    #[test]
    fn flow_data_uses_caller_reference() {
        let flow_data = gateway().payment_flow_data(Some("order-77"), None, None);

        assert_eq!(flow_data.connector_request_reference_id, "order-77");
        assert_eq!(flow_data.reference_id.as_deref(), Some("order-77"));
    }

    #[test]
    fn flow_data_falls_back_to_payment_id() {
        let flow_data = gateway().payment_flow_data(None, None, None);

        assert!(flow_data.payment_id.starts_with("pay_"));
        assert_eq!(
            flow_data.connector_request_reference_id,
            flow_data.payment_id
        );
        assert!(flow_data.reference_id.is_none());
    }

    #[test]
    fn stored_token_wins_over_card() {
        let request = card_request(Some(Secret::new("tok_1".to_string())));

        match payment_method_data(&request).unwrap() {
            PaymentMethodData::CardToken(token) => {
                assert_eq!(
                    token.card_holder_name.map(|name| name.peek().clone()),
                    Some("John Doe".to_string())
                );
                assert!(token.card_cvc.is_none());
            }
            other => panic!("expected a card token, got {other:?}"),
        }
    }

    #[test]
    fn card_without_token_is_sent_as_card() {
        let request = card_request(None);

        assert!(matches!(
            payment_method_data(&request).unwrap(),
            PaymentMethodData::Card(_)
        ));
    }

    #[test]
    fn reference_at_the_limit_is_accepted() {
        let mut request = card_request(None);
        request.reference = Some("r".repeat(MAX_TRACKING_ID_LENGTH));

        assert!(validate_payment_request(&request).is_ok());
    }
}
