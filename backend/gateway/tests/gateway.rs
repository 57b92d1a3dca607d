#![allow(clippy::unwrap_used)]
#![allow(clippy::panic_in_result_fn)]

use std::marker::PhantomData;

use common_enums::{
    AttemptStatus, AuthenticationType, Currency, PaymentMethod, RefundStatus,
};
use common_utils::{consts::Env, id_type::MerchantId, types::MinorUnit};
use domain_types::{
    connector_flow::{Capture, PaymentMethodToken, Refund},
    connector_types::{
        PaymentFlowData, PaymentMethodTokenResponse, PaymentMethodTokenizationData,
        PaymentsCaptureData, PaymentsResponseData, RefundFlowData, RefundsData,
        RefundsResponseData, ResponseId,
    },
    errors::{ApplicationErrorResponse, ConnectorError},
    payment_address::PaymentAddress,
    payment_method_data::PaymentMethodData,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    types::{ConnectorParams, Connectors, Proxy},
};
use gateway::{
    configs::Common,
    error::ErrorSwitch,
    logger::config::{Level, Log, LogConsole, LogFormat},
    types::{
        generate_payment_response, generate_refund_response, generate_tokenize_response,
        CardDetails, PaymentRequest,
    },
    AlliedwalletGateway, GatewayConfig, GatewayCredentials,
};
use hyperswitch_masking::Secret;

fn test_config() -> GatewayConfig {
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
    }
}

fn test_gateway() -> AlliedwalletGateway {
    AlliedwalletGateway::new(
        test_config(),
        GatewayCredentials {
            merchant_id: Secret::new("merchant_123".to_string()),
            site_id: Secret::new("site_456".to_string()),
            token: Secret::new("bearer_token".to_string()),
        },
    )
}

fn test_card() -> CardDetails {
    CardDetails {
        number: "4111111111111111".parse().unwrap(),
        exp_month: Secret::new("03".to_string()),
        exp_year: Secret::new("2030".to_string()),
        cvc: Secret::new("737".to_string()),
        holder_name: Some(Secret::new("John Doe".to_string())),
    }
}

fn payment_request(card: Option<CardDetails>, reference: Option<String>) -> PaymentRequest {
    PaymentRequest {
        amount: MinorUnit::new(1599),
        currency: Currency::USD,
        card,
        token: None,
        billing: None,
        email: None,
        ip_address: None,
        reference,
    }
}

fn auth_type() -> ConnectorAuthType {
    ConnectorAuthType::SignatureKey {
        api_key: Secret::new("bearer_token".to_string()),
        key1: Secret::new("merchant_123".to_string()),
        api_secret: Secret::new("site_456".to_string()),
    }
}

fn payment_flow_data(status: AttemptStatus) -> PaymentFlowData {
    PaymentFlowData {
        merchant_id: MerchantId::new_unchecked("merchant_123".to_string()),
        customer_id: None,
        payment_id: "pay_1".to_string(),
        attempt_id: "attempt_1".to_string(),
        status,
        payment_method: PaymentMethod::Card,
        description: None,
        address: PaymentAddress::new(None, None, None, None),
        auth_type: AuthenticationType::NoThreeDs,
        reference_id: None,
        payment_method_token: None,
        connector_request_reference_id: "track_1".to_string(),
        test_mode: None,
        connector_http_status_code: Some(200),
        connector_response_headers: None,
        external_latency: None,
        connectors: test_config().connectors,
        raw_connector_response: None,
        raw_connector_request: None,
    }
}

fn refund_flow_data(status: RefundStatus) -> RefundFlowData {
    RefundFlowData {
        merchant_id: MerchantId::new_unchecked("merchant_123".to_string()),
        status,
        refund_id: Some("ref_1".to_string()),
        connectors: test_config().connectors,
        connector_request_reference_id: "ref_1".to_string(),
        raw_connector_response: None,
        connector_response_headers: None,
        raw_connector_request: None,
        test_mode: None,
        payment_method: Some(PaymentMethod::Card),
    }
}

#[tokio::test]
async fn purchase_requires_card_or_token() {
    let gateway = test_gateway();

    let error = gateway
        .purchase(payment_request(None, None))
        .await
        .unwrap_err();

    let api_error = error.current_context().get_api_error();
    assert_eq!(api_error.error_identifier, 400);
    assert_eq!(api_error.sub_code, "INVALID_REQUEST_DATA");
    assert!(api_error.error_message.contains("card or token"));
}

#[tokio::test]
async fn purchase_rejects_overlong_reference() {
    let gateway = test_gateway();
    let request = payment_request(Some(test_card()), Some("r".repeat(101)));

    let error = gateway.purchase(request).await.unwrap_err();

    let api_error = error.current_context().get_api_error();
    assert_eq!(api_error.error_identifier, 400);
    assert!(api_error.error_message.contains("100 characters"));
}

#[tokio::test]
async fn authorize_rejects_overlong_reference() {
    let gateway = test_gateway();
    let request = payment_request(Some(test_card()), Some("r".repeat(150)));

    let error = gateway.authorize(request).await.unwrap_err();

    assert_eq!(error.current_context().get_api_error().error_identifier, 400);
}

#[test]
fn settled_payment_maps_transaction_fields() {
    let router_data = RouterDataV2::<
        Capture,
        PaymentFlowData,
        PaymentsCaptureData,
        PaymentsResponseData,
    > {
        flow: PhantomData,
        resource_common_data: payment_flow_data(AttemptStatus::Charged),
        connector_auth_type: auth_type(),
        request: PaymentsCaptureData::default(),
        response: Ok(PaymentsResponseData::TransactionResponse {
            resource_id: ResponseId::ConnectorTransactionId("7f3a9c".to_string()),
            connector_metadata: None,
            network_txn_id: None,
            connector_response_reference_id: Some("track_1".to_string()),
            status_code: 200,
        }),
    };

    let response = generate_payment_response(router_data);

    assert_eq!(response.transaction_id.as_deref(), Some("7f3a9c"));
    assert_eq!(response.status, AttemptStatus::Charged);
    assert_eq!(response.reference.as_deref(), Some("track_1"));
    assert!(response.error.is_none());
    assert_eq!(response.status_code, 200);
}

#[test]
fn declined_payment_carries_processor_error() {
    let router_data = RouterDataV2::<
        Capture,
        PaymentFlowData,
        PaymentsCaptureData,
        PaymentsResponseData,
    > {
        flow: PhantomData,
        resource_common_data: payment_flow_data(AttemptStatus::Failure),
        connector_auth_type: auth_type(),
        request: PaymentsCaptureData::default(),
        response: Err(ErrorResponse {
            code: "Declined".to_string(),
            message: "Insufficient funds".to_string(),
            reason: Some("Insufficient funds".to_string()),
            status_code: 200,
            attempt_status: Some(AttemptStatus::Failure),
            connector_transaction_id: Some("txn_9".to_string()),
            network_decline_code: None,
            network_advice_code: None,
            network_error_message: None,
        }),
    };

    let response = generate_payment_response(router_data);

    assert_eq!(response.status, AttemptStatus::Failure);
    assert_eq!(response.transaction_id.as_deref(), Some("txn_9"));
    let error = response.error.unwrap();
    assert_eq!(error.code, "Declined");
    assert_eq!(error.message, "Insufficient funds");
    assert_eq!(response.status_code, 200);
}

#[test]
fn http_error_keeps_flow_status() {
    // A 401 has no processor verdict, so the payment stays in the status
    // the flow was in when the call failed.
    let router_data = RouterDataV2::<
        Capture,
        PaymentFlowData,
        PaymentsCaptureData,
        PaymentsResponseData,
    > {
        flow: PhantomData,
        resource_common_data: payment_flow_data(AttemptStatus::Pending),
        connector_auth_type: auth_type(),
        request: PaymentsCaptureData::default(),
        response: Err(ErrorResponse {
            code: "401".to_string(),
            message: "Unauthorized".to_string(),
            reason: None,
            status_code: 401,
            attempt_status: None,
            connector_transaction_id: None,
            network_decline_code: None,
            network_advice_code: None,
            network_error_message: None,
        }),
    };

    let response = generate_payment_response(router_data);

    assert_eq!(response.status, AttemptStatus::Pending);
    assert!(response.transaction_id.is_none());
    assert_eq!(response.status_code, 401);
}

#[test]
fn settled_refund_maps_refund_fields() {
    let router_data = RouterDataV2::<Refund, RefundFlowData, RefundsData, RefundsResponseData> {
        flow: PhantomData,
        resource_common_data: refund_flow_data(RefundStatus::Success),
        connector_auth_type: auth_type(),
        request: RefundsData {
            refund_id: "ref_1".to_string(),
            connector_transaction_id: "txn_9".to_string(),
            currency: Currency::USD,
            payment_amount: 1599,
            reason: None,
            refund_amount: 1599,
            minor_payment_amount: MinorUnit::new(1599),
            minor_refund_amount: MinorUnit::new(1599),
            refund_status: RefundStatus::Pending,
            capture_method: None,
            browser_info: None,
        },
        response: Ok(RefundsResponseData {
            connector_refund_id: "re_42".to_string(),
            refund_status: RefundStatus::Success,
            status_code: 200,
        }),
    };

    let response = generate_refund_response(router_data);

    assert_eq!(response.refund_id.as_deref(), Some("re_42"));
    assert_eq!(response.status, RefundStatus::Success);
    assert!(response.error.is_none());
    assert_eq!(response.status_code, 200);
}

#[test]
fn failed_refund_carries_processor_error() {
    let router_data = RouterDataV2::<Refund, RefundFlowData, RefundsData, RefundsResponseData> {
        flow: PhantomData,
        resource_common_data: refund_flow_data(RefundStatus::Pending),
        connector_auth_type: auth_type(),
        request: RefundsData {
            refund_id: "ref_1".to_string(),
            connector_transaction_id: "txn_9".to_string(),
            currency: Currency::USD,
            payment_amount: 1599,
            reason: None,
            refund_amount: 1599,
            minor_payment_amount: MinorUnit::new(1599),
            minor_refund_amount: MinorUnit::new(1599),
            refund_status: RefundStatus::Pending,
            capture_method: None,
            browser_info: None,
        },
        response: Err(ErrorResponse {
            code: "Failed".to_string(),
            message: "Transaction not eligible for refund".to_string(),
            reason: None,
            status_code: 400,
            attempt_status: None,
            connector_transaction_id: Some("txn_9".to_string()),
            network_decline_code: None,
            network_advice_code: None,
            network_error_message: None,
        }),
    };

    let response = generate_refund_response(router_data);

    assert_eq!(response.refund_id.as_deref(), Some("txn_9"));
    assert_eq!(response.status, RefundStatus::Pending);
    assert_eq!(response.error.unwrap().code, "Failed");
    assert_eq!(response.status_code, 400);
}

#[test]
fn tokenization_hands_back_the_token() {
    let router_data = RouterDataV2::<
        PaymentMethodToken,
        PaymentFlowData,
        PaymentMethodTokenizationData<domain_types::payment_method_data::DefaultPCIHolder>,
        PaymentMethodTokenResponse,
    > {
        flow: PhantomData,
        resource_common_data: payment_flow_data(AttemptStatus::Pending),
        connector_auth_type: auth_type(),
        request: PaymentMethodTokenizationData {
            payment_method_data: PaymentMethodData::Card(test_card().into()),
            browser_info: None,
            currency: Currency::USD,
            amount: MinorUnit::new(0),
        },
        response: Ok(PaymentMethodTokenResponse {
            token: "tok_5f2c".to_string(),
        }),
    };

    let response = generate_tokenize_response(router_data);

    assert_eq!(response.token.as_deref(), Some("tok_5f2c"));
    assert!(response.error.is_none());
    assert_eq!(response.status_code, 200);
}

#[test]
fn failed_tokenization_carries_processor_error() {
    let router_data = RouterDataV2::<
        PaymentMethodToken,
        PaymentFlowData,
        PaymentMethodTokenizationData<domain_types::payment_method_data::DefaultPCIHolder>,
        PaymentMethodTokenResponse,
    > {
        flow: PhantomData,
        resource_common_data: payment_flow_data(AttemptStatus::Pending),
        connector_auth_type: auth_type(),
        request: PaymentMethodTokenizationData {
            payment_method_data: PaymentMethodData::Card(test_card().into()),
            browser_info: None,
            currency: Currency::USD,
            amount: MinorUnit::new(0),
        },
        response: Err(ErrorResponse {
            code: "Invalid".to_string(),
            message: "Invalid card number".to_string(),
            reason: None,
            status_code: 422,
            attempt_status: None,
            connector_transaction_id: None,
            network_decline_code: None,
            network_advice_code: None,
            network_error_message: None,
        }),
    };

    let response = generate_tokenize_response(router_data);

    assert!(response.token.is_none());
    assert_eq!(response.error.unwrap().message, "Invalid card number");
    assert_eq!(response.status_code, 422);
}

#[test]
fn missing_field_maps_to_bad_request() {
    let error: ApplicationErrorResponse = ConnectorError::MissingRequiredField {
        field_name: "amount",
    }
    .switch();

    let api_error = error.get_api_error();
    assert_eq!(api_error.sub_code, "BAD_REQUEST");
    assert_eq!(api_error.error_identifier, 400);
    assert!(api_error.error_message.contains("amount"));
}

#[test]
fn deserialization_failure_maps_to_internal_error() {
    let error: ApplicationErrorResponse = ConnectorError::ResponseDeserializationFailed.switch();

    let api_error = error.get_api_error();
    assert_eq!(api_error.sub_code, "INTERNAL_SERVER_ERROR");
    assert_eq!(api_error.error_identifier, 500);
}

#[test]
fn missing_transaction_id_maps_to_unprocessable() {
    let error: ApplicationErrorResponse = ConnectorError::MissingConnectorTransactionID.switch();

    let api_error = error.get_api_error();
    assert_eq!(api_error.sub_code, "UNPROCESSABLE_ENTITY");
    assert_eq!(api_error.error_identifier, 422);
}

#[test]
fn unsupported_flow_maps_to_not_implemented() {
    let error: ApplicationErrorResponse = ConnectorError::NotSupported {
        message: "Wallet payments".to_string(),
        connector: "alliedwallet",
    }
    .switch();

    let api_error = error.get_api_error();
    assert_eq!(api_error.sub_code, "NOT_IMPLEMENTED");
    assert_eq!(api_error.error_identifier, 501);
}
