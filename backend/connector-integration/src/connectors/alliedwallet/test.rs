#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::expect_used)]
#[allow(clippy::panic)]
mod tests {
    use std::{marker::PhantomData, str::FromStr};

    use cards::CardNumber;
    use common_enums::{
        AttemptStatus, AuthenticationType, CaptureMethod, CountryAlpha2, Currency, PaymentMethod,
        RefundStatus,
    };
    use common_utils::{
        consts,
        pii::Email,
        request::{Method, Request, RequestContent},
        types::MinorUnit,
    };
    use domain_types::{
        connector_types::{ConnectorEnum, PaymentFlowData, RefundFlowData},
        payment_address::{Address, AddressDetails, PaymentAddress, PhoneDetails},
        payment_method_data::{Card, DefaultPCIHolder, PaymentMethodData, RawCardNumber},
        router_data::{ConnectorAuthType, ErrorResponse},
        router_data_v2::RouterDataV2,
        router_request_types::BrowserInformation,
        router_response_types::Response,
        types::{ConnectorParams, Connectors},
    };
    use hyperswitch_masking::{ErasedMaskSerialize, Secret};
    use interfaces::{
        connector_integration_v2::BoxedConnectorIntegrationV2, connector_types::BoxedConnector,
    };
    use serde_json::Value;

    use crate::{connectors::Alliedwallet, types::ConnectorData};

    const BASE_URL: &str = "https://api.alliedwallet.com/";

    fn connectors() -> Connectors {
        Connectors {
            alliedwallet: ConnectorParams {
                base_url: BASE_URL.to_string(),
            },
        }
    }

    fn signature_auth() -> ConnectorAuthType {
        ConnectorAuthType::SignatureKey {
            api_key: Secret::new("oauth-token".to_string()),
            key1: Secret::new("merchant-42".to_string()),
            api_secret: Secret::new("site-7".to_string()),
        }
    }

    fn billing_address() -> PaymentAddress {
        PaymentAddress::new(
            None,
            Some(Address {
                address: Some(AddressDetails {
                    city: Some(Secret::new("Anytown".to_string())),
                    country: Some(CountryAlpha2::US),
                    line1: Some(Secret::new("123 Main St".to_string())),
                    line2: None,
                    line3: None,
                    zip: Some(Secret::new("12345".to_string())),
                    state: Some(Secret::new("CA".to_string())),
                    first_name: Some(Secret::new("John".to_string())),
                    last_name: Some(Secret::new("Doe".to_string())),
                }),
                phone: Some(PhoneDetails {
                    number: Some(Secret::new("5550100123".to_string())),
                    country_code: Some("+1".to_string()),
                }),
                email: None,
            }),
            None,
            None,
        )
    }

    fn payment_flow_data() -> PaymentFlowData {
        PaymentFlowData {
            merchant_id: common_utils::id_type::MerchantId::default(),
            customer_id: None,
            payment_id: "pay_abcdef123456".to_string(),
            attempt_id: "attempt_123456abcdef".to_string(),
            status: AttemptStatus::Pending,
            payment_method: PaymentMethod::Card,
            description: Some("Payment for order #12345".to_string()),
            address: billing_address(),
            auth_type: AuthenticationType::NoThreeDs,
            reference_id: None,
            payment_method_token: None,
            connector_request_reference_id: "track_1234567890".to_string(),
            test_mode: None,
            connector_http_status_code: None,
            connector_response_headers: None,
            external_latency: None,
            connectors: connectors(),
            raw_connector_response: None,
            raw_connector_request: None,
        }
    }

    fn test_card() -> Card<DefaultPCIHolder> {
        Card {
            card_number: RawCardNumber(CardNumber::from_str("4242424242424242").unwrap()),
            card_exp_month: Secret::new("10".to_string()),
            card_exp_year: Secret::new("25".to_string()),
            card_cvc: Secret::new("123".to_string()),
            card_issuer: None,
            card_network: None,
            card_type: None,
            card_issuing_country: None,
            bank_code: None,
            nick_name: None,
            card_holder_name: Some(Secret::new("John Doe".to_string())),
        }
    }

    fn browser_info() -> BrowserInformation {
        BrowserInformation {
            color_depth: None,
            java_enabled: None,
            java_script_enabled: None,
            language: None,
            screen_height: None,
            screen_width: None,
            time_zone: None,
            ip_address: Some("203.0.113.7".parse().unwrap()),
            accept_header: None,
            user_agent: None,
            accept_language: None,
        }
    }

    fn http_response(body: &str, status_code: u16) -> Response {
        Response {
            headers: None,
            response: bytes::Bytes::from(body.to_string()),
            status_code,
        }
    }

    fn masked_body(request: &Request) -> Value {
        match request.body.as_ref() {
            Some(RequestContent::Json(i) | RequestContent::FormUrlEncoded(i)) => {
                i.masked_serialize().unwrap()
            }
            Some(RequestContent::RawBytes(_)) | None => Value::Null,
        }
    }

    fn connector_data() -> ConnectorData<DefaultPCIHolder> {
        let connector: BoxedConnector<DefaultPCIHolder> = Box::new(Alliedwallet::new());
        ConnectorData {
            connector,
            connector_name: ConnectorEnum::Alliedwallet,
        }
    }

    pub mod authorize {
        use common_utils::types::{AmountConvertor, StringMajorUnitForConnector};
        use domain_types::connector_types::{
            PaymentsAuthorizeData, PaymentsResponseData, ResponseId,
        };

        use super::*;
        use crate::connectors::alliedwallet::transformers::{
            AlliedwalletPaymentsRequest, AlliedwalletRouterData,
        };

        type AuthorizeIntegration<'a> = BoxedConnectorIntegrationV2<
            'a,
            domain_types::connector_flow::Authorize,
            PaymentFlowData,
            PaymentsAuthorizeData<DefaultPCIHolder>,
            PaymentsResponseData,
        >;

        fn request_data(
            capture_method: Option<CaptureMethod>,
        ) -> PaymentsAuthorizeData<DefaultPCIHolder> {
            PaymentsAuthorizeData {
                payment_method_data: PaymentMethodData::Card(test_card()),
                amount: MinorUnit::new(40000),
                email: Some(Email::try_from("customer@example.com".to_string()).unwrap()),
                customer_name: None,
                currency: Currency::USD,
                confirm: true,
                capture_method,
                browser_info: Some(browser_info()),
                payment_method_type: None,
                customer_id: None,
                metadata: None,
                minor_amount: MinorUnit::new(40000),
                merchant_order_reference_id: None,
            }
        }

        fn router_data(
            capture_method: Option<CaptureMethod>,
        ) -> RouterDataV2<
            domain_types::connector_flow::Authorize,
            PaymentFlowData,
            PaymentsAuthorizeData<DefaultPCIHolder>,
            PaymentsResponseData,
        > {
            RouterDataV2 {
                flow: PhantomData,
                resource_common_data: payment_flow_data(),
                connector_auth_type: signature_auth(),
                request: request_data(capture_method),
                response: Err(ErrorResponse::default()),
            }
        }

        #[test]
        fn builds_sale_request_for_automatic_capture() {
            let req = router_data(Some(CaptureMethod::Automatic));
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let request = integration.build_request_v2(&req).unwrap().unwrap();
            assert_eq!(request.method, Method::Post);
            assert_eq!(
                request.url,
                "https://api.alliedwallet.com/merchants/merchant-42/saletransactions"
            );
            assert!(request.headers.iter().any(|(name, _)| name == "Authorization"));
            assert!(request.headers.iter().any(|(name, _)| name == "Content-Type"));

            let body = masked_body(&request);
            assert_eq!(body["amount"], "400.00");
            assert_eq!(body["currency"], "USD");
            assert_eq!(body["trackingId"], "track_1234567890");
            assert!(body.get("cardNumber").is_some());
            assert!(body.get("cVVCode").is_some());
            assert!(body.get("iPAddress").is_some());
            assert!(body.get("email").is_some());
            assert!(body.get("quickPayToken").is_none());
        }

        #[test]
        fn builds_authorize_request_for_manual_capture() {
            let req = router_data(Some(CaptureMethod::Manual));
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let request = integration.build_request_v2(&req).unwrap().unwrap();
            assert_eq!(
                request.url,
                "https://api.alliedwallet.com/merchants/merchant-42/authorizetransactions"
            );
        }

        #[test]
        fn builds_token_sale_request_when_token_is_present() {
            let mut req = router_data(None);
            req.resource_common_data = req
                .resource_common_data
                .set_payment_method_token(Some("quickpay-token-1".to_string()));
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let request = integration.build_request_v2(&req).unwrap().unwrap();
            assert_eq!(
                request.url,
                "https://api.alliedwallet.com/merchants/merchant-42/tokensaletransactions"
            );

            let body = masked_body(&request);
            assert!(body.get("quickPayToken").is_some());
            assert!(body.get("cardNumber").is_none());
            assert_eq!(body["trackingId"], "track_1234567890");
        }

        #[test]
        fn serializes_card_request_with_processor_field_names() {
            let req = router_data(Some(CaptureMethod::Automatic));
            let amount = StringMajorUnitForConnector
                .convert(MinorUnit::new(40000), Currency::USD)
                .unwrap();
            let connector_router_data = AlliedwalletRouterData::try_from((amount, &req)).unwrap();
            let connector_request =
                AlliedwalletPaymentsRequest::try_from(&connector_router_data).unwrap();

            let body = serde_json::to_value(&connector_request).unwrap();
            assert_eq!(body["siteId"], "site-7");
            assert_eq!(body["nameOnCard"], "John Doe");
            assert_eq!(body["cardNumber"], "4242424242424242");
            assert_eq!(body["expirationMonth"], 10);
            assert_eq!(body["expirationYear"], 2025);
            assert_eq!(body["cVVCode"], "123");
            assert_eq!(body["iPAddress"], "203.0.113.7");
            assert_eq!(body["countryId"], "US");
            assert_eq!(body["postalCode"], "12345");
        }

        #[test]
        fn rejects_scheduled_capture_method() {
            let req = router_data(Some(CaptureMethod::Scheduled));
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            assert!(integration.build_request_v2(&req).is_err());
        }

        #[test]
        fn rejects_non_signature_key_auth() {
            let mut req = router_data(Some(CaptureMethod::Automatic));
            req.connector_auth_type = ConnectorAuthType::HeaderKey {
                api_key: Secret::new("oauth-token".to_string()),
            };
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            assert!(integration.build_request_v2(&req).is_err());
        }

        #[test]
        fn rejects_overlong_tracking_id() {
            let mut req = router_data(Some(CaptureMethod::Automatic));
            req.resource_common_data.connector_request_reference_id = "x".repeat(101);
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            assert!(integration.build_request_v2(&req).is_err());
        }

        #[test]
        fn rejects_non_card_payment_method() {
            let mut req = router_data(Some(CaptureMethod::Automatic));
            req.request.payment_method_data = PaymentMethodData::CardToken(
                domain_types::payment_method_data::CardToken {
                    card_holder_name: None,
                    card_cvc: None,
                },
            );
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            assert!(integration.build_request_v2(&req).is_err());
        }

        #[test]
        fn handles_successful_sale_response() {
            let req = router_data(Some(CaptureMethod::Automatic));
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(
                        r#"{"id": "txn_123", "state": "Successful", "message": "Approved"}"#,
                        200,
                    ),
                    None,
                )
                .unwrap();

            assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
            let PaymentsResponseData::TransactionResponse {
                resource_id,
                connector_response_reference_id,
                status_code,
                ..
            } = result.response.unwrap();
            match resource_id {
                ResponseId::ConnectorTransactionId(id) => assert_eq!(id, "txn_123"),
                other => panic!("unexpected resource id: {other:?}"),
            }
            assert_eq!(connector_response_reference_id.as_deref(), Some("txn_123"));
            assert_eq!(status_code, 200);
        }

        #[test]
        fn handles_successful_authorize_with_status_spelling() {
            let req = router_data(Some(CaptureMethod::Manual));
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(r#"{"id": "txn_124", "status": "Successful"}"#, 200),
                    None,
                )
                .unwrap();

            assert_eq!(result.resource_common_data.status, AttemptStatus::Authorized);
            assert!(result.response.is_ok());
        }

        #[test]
        fn handles_declined_sale_response() {
            let req = router_data(Some(CaptureMethod::Automatic));
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(
                        r#"{"id": "txn_125", "state": "Declined", "message": "Insufficient funds"}"#,
                        200,
                    ),
                    None,
                )
                .unwrap();

            assert_eq!(result.resource_common_data.status, AttemptStatus::Failure);
            let error = result.response.unwrap_err();
            assert_eq!(error.code, consts::NO_ERROR_CODE);
            assert_eq!(error.message, "Insufficient funds");
            assert_eq!(error.reason.as_deref(), Some("Insufficient funds"));
            assert_eq!(error.attempt_status, Some(AttemptStatus::Failure));
            assert_eq!(error.connector_transaction_id.as_deref(), Some("txn_125"));
            assert_eq!(error.status_code, 200);
        }

        #[test]
        fn handles_declined_authorize_response() {
            let req = router_data(Some(CaptureMethod::Manual));
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(r#"{"id": "txn_126", "state": "Declined"}"#, 200),
                    None,
                )
                .unwrap();

            assert_eq!(
                result.resource_common_data.status,
                AttemptStatus::AuthorizationFailed
            );
            let error = result.response.unwrap_err();
            assert_eq!(error.message, consts::NO_ERROR_MESSAGE);
        }

        #[test]
        fn records_response_in_connector_event() {
            use common_utils::events::FlowName;
            use interfaces::events::connector_api_logs::ConnectorEvent;

            let req = router_data(Some(CaptureMethod::Automatic));
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let mut event = ConnectorEvent::new(
                "alliedwallet".to_string(),
                FlowName::Authorize,
                "req_123".to_string(),
            );
            let result = integration.handle_response_v2(
                &req,
                http_response(r#"{"id": "txn_127", "state": "Successful"}"#, 200),
                Some(&mut event),
            );
            assert!(result.is_ok());
        }

        #[test]
        fn parses_error_body_message() {
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let error = integration
                .get_error_response_v2(http_response(r#"{"message": "Invalid token"}"#, 401), None)
                .unwrap();
            assert_eq!(error.code, consts::NO_ERROR_CODE);
            assert_eq!(error.message, "Invalid token");
            assert_eq!(error.status_code, 401);
        }

        #[test]
        fn falls_back_when_error_body_is_not_json() {
            let connector_data = connector_data();
            let integration: AuthorizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let error = integration
                .get_error_response_v2(http_response("<html>Bad Gateway</html>", 502), None)
                .unwrap();
            assert_eq!(error.code, consts::NO_ERROR_CODE);
            assert_eq!(error.message, consts::UNSUPPORTED_ERROR_MESSAGE);
            assert_eq!(error.reason.as_deref(), Some("<html>Bad Gateway</html>"));
            assert_eq!(error.status_code, 502);
        }

        #[test]
        fn tokenization_before_payment_is_disabled() {
            let connector_data = connector_data();
            assert!(!connector_data
                .connector
                .should_do_payment_method_token(PaymentMethod::Card, None));
        }
    }

    pub mod capture {
        use domain_types::connector_types::{
            PaymentsCaptureData, PaymentsResponseData, ResponseId,
        };

        use super::*;

        type CaptureIntegration<'a> = BoxedConnectorIntegrationV2<
            'a,
            domain_types::connector_flow::Capture,
            PaymentFlowData,
            PaymentsCaptureData,
            PaymentsResponseData,
        >;

        fn router_data(
            connector_transaction_id: ResponseId,
        ) -> RouterDataV2<
            domain_types::connector_flow::Capture,
            PaymentFlowData,
            PaymentsCaptureData,
            PaymentsResponseData,
        > {
            RouterDataV2 {
                flow: PhantomData,
                resource_common_data: payment_flow_data(),
                connector_auth_type: signature_auth(),
                request: PaymentsCaptureData {
                    amount_to_capture: 15000,
                    minor_amount_to_capture: MinorUnit::new(15000),
                    currency: Currency::USD,
                    connector_transaction_id,
                    browser_info: None,
                    capture_method: Some(CaptureMethod::Manual),
                    merchant_order_reference_id: None,
                },
                response: Err(ErrorResponse::default()),
            }
        }

        #[test]
        fn builds_capture_request() {
            let req = router_data(ResponseId::ConnectorTransactionId("auth_txn_1".to_string()));
            let connector_data = connector_data();
            let integration: CaptureIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let request = integration.build_request_v2(&req).unwrap().unwrap();
            assert_eq!(request.method, Method::Post);
            assert_eq!(
                request.url,
                "https://api.alliedwallet.com/merchants/merchant-42/capturetransactions"
            );

            let body = masked_body(&request);
            assert_eq!(body["authorizeTransactionId"], "auth_txn_1");
            assert_eq!(body["amount"], "150.00");
        }

        #[test]
        fn requires_connector_transaction_id() {
            let req = router_data(ResponseId::NoResponseId);
            let connector_data = connector_data();
            let integration: CaptureIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            assert!(integration.build_request_v2(&req).is_err());
        }

        #[test]
        fn handles_successful_capture_response() {
            let req = router_data(ResponseId::ConnectorTransactionId("auth_txn_1".to_string()));
            let connector_data = connector_data();
            let integration: CaptureIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(r#"{"id": "cap_txn_1", "state": "Successful"}"#, 200),
                    None,
                )
                .unwrap();

            assert_eq!(result.resource_common_data.status, AttemptStatus::Charged);
            assert!(result.response.is_ok());
        }

        #[test]
        fn handles_declined_capture_response() {
            let req = router_data(ResponseId::ConnectorTransactionId("auth_txn_1".to_string()));
            let connector_data = connector_data();
            let integration: CaptureIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(
                        r#"{"id": "cap_txn_1", "status": "Declined", "message": "Authorization expired"}"#,
                        200,
                    ),
                    None,
                )
                .unwrap();

            assert_eq!(
                result.resource_common_data.status,
                AttemptStatus::CaptureFailed
            );
            let error = result.response.unwrap_err();
            assert_eq!(error.message, "Authorization expired");
            assert_eq!(error.attempt_status, Some(AttemptStatus::CaptureFailed));
        }
    }

    pub mod void {
        use domain_types::connector_types::{PaymentVoidData, PaymentsResponseData};

        use super::*;

        type VoidIntegration<'a> = BoxedConnectorIntegrationV2<
            'a,
            domain_types::connector_flow::Void,
            PaymentFlowData,
            PaymentVoidData,
            PaymentsResponseData,
        >;

        fn router_data() -> RouterDataV2<
            domain_types::connector_flow::Void,
            PaymentFlowData,
            PaymentVoidData,
            PaymentsResponseData,
        > {
            RouterDataV2 {
                flow: PhantomData,
                resource_common_data: payment_flow_data(),
                connector_auth_type: signature_auth(),
                request: PaymentVoidData {
                    connector_transaction_id: "sale_txn_1".to_string(),
                    cancellation_reason: None,
                    browser_info: None,
                    amount: None,
                    currency: None,
                },
                response: Err(ErrorResponse::default()),
            }
        }

        #[test]
        fn builds_void_request() {
            let req = router_data();
            let connector_data = connector_data();
            let integration: VoidIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let request = integration.build_request_v2(&req).unwrap().unwrap();
            assert_eq!(request.method, Method::Post);
            assert_eq!(
                request.url,
                "https://api.alliedwallet.com/merchants/merchant-42/voidtransactions"
            );

            let body = masked_body(&request);
            assert_eq!(body["saleTransactionId"], "sale_txn_1");
            assert!(body.get("amount").is_none());
        }

        #[test]
        fn handles_successful_void_response() {
            let req = router_data();
            let connector_data = connector_data();
            let integration: VoidIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(r#"{"id": "sale_txn_1", "state": "Successful"}"#, 200),
                    None,
                )
                .unwrap();

            assert_eq!(result.resource_common_data.status, AttemptStatus::Voided);
            assert!(result.response.is_ok());
        }

        #[test]
        fn handles_declined_void_response() {
            let req = router_data();
            let connector_data = connector_data();
            let integration: VoidIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(
                        r#"{"id": "sale_txn_1", "state": "Declined", "message": "Already settled"}"#,
                        200,
                    ),
                    None,
                )
                .unwrap();

            assert_eq!(result.resource_common_data.status, AttemptStatus::VoidFailed);
            let error = result.response.unwrap_err();
            assert_eq!(error.message, "Already settled");
        }
    }

    pub mod refund {
        use domain_types::connector_types::{RefundsData, RefundsResponseData};

        use super::*;

        type RefundIntegration<'a> = BoxedConnectorIntegrationV2<
            'a,
            domain_types::connector_flow::Refund,
            RefundFlowData,
            RefundsData,
            RefundsResponseData,
        >;

        fn refund_flow_data() -> RefundFlowData {
            RefundFlowData {
                merchant_id: common_utils::id_type::MerchantId::default(),
                status: RefundStatus::Pending,
                refund_id: Some("ref_1".to_string()),
                connectors: connectors(),
                connector_request_reference_id: "track_refund_1".to_string(),
                raw_connector_response: None,
                connector_response_headers: None,
                raw_connector_request: None,
                test_mode: None,
                payment_method: Some(PaymentMethod::Card),
            }
        }

        fn router_data() -> RouterDataV2<
            domain_types::connector_flow::Refund,
            RefundFlowData,
            RefundsData,
            RefundsResponseData,
        > {
            RouterDataV2 {
                flow: PhantomData,
                resource_common_data: refund_flow_data(),
                connector_auth_type: signature_auth(),
                request: RefundsData {
                    refund_id: "ref_1".to_string(),
                    connector_transaction_id: "sale_txn_1".to_string(),
                    currency: Currency::USD,
                    payment_amount: 40000,
                    reason: None,
                    refund_amount: 40000,
                    minor_payment_amount: MinorUnit::new(40000),
                    minor_refund_amount: MinorUnit::new(40000),
                    refund_status: RefundStatus::Pending,
                    capture_method: None,
                    browser_info: None,
                },
                response: Err(ErrorResponse::default()),
            }
        }

        #[test]
        fn builds_refund_request() {
            let req = router_data();
            let connector_data = connector_data();
            let integration: RefundIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let request = integration.build_request_v2(&req).unwrap().unwrap();
            assert_eq!(request.method, Method::Post);
            assert_eq!(
                request.url,
                "https://api.alliedwallet.com/merchants/merchant-42/refundtransactions"
            );

            let body = masked_body(&request);
            assert_eq!(body["saleTransactionId"], "sale_txn_1");
            assert_eq!(body["amount"], "400.00");
        }

        #[test]
        fn handles_successful_refund_response() {
            let req = router_data();
            let connector_data = connector_data();
            let integration: RefundIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(r#"{"id": "rfnd_1", "state": "Successful"}"#, 200),
                    None,
                )
                .unwrap();

            assert_eq!(result.resource_common_data.status, RefundStatus::Success);
            let refund_response = result.response.unwrap();
            assert_eq!(refund_response.connector_refund_id, "rfnd_1");
            assert_eq!(refund_response.refund_status, RefundStatus::Success);
            assert_eq!(refund_response.status_code, 200);
        }

        #[test]
        fn handles_declined_refund_response() {
            let req = router_data();
            let connector_data = connector_data();
            let integration: RefundIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(
                        r#"{"id": "rfnd_2", "status": "Declined", "message": "Exceeds refundable amount"}"#,
                        200,
                    ),
                    None,
                )
                .unwrap();

            assert_eq!(result.resource_common_data.status, RefundStatus::Failure);
            let error = result.response.unwrap_err();
            assert_eq!(error.message, "Exceeds refundable amount");
            assert_eq!(error.attempt_status, None);
            assert_eq!(error.connector_transaction_id.as_deref(), Some("rfnd_2"));
        }

        #[test]
        fn missing_refund_id_on_success_is_an_error() {
            let req = router_data();
            let connector_data = connector_data();
            let integration: RefundIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration.handle_response_v2(
                &req,
                http_response(r#"{"state": "Successful"}"#, 200),
                None,
            );
            assert!(result.is_err());
        }
    }

    pub mod tokenize {
        use domain_types::connector_types::{
            PaymentMethodTokenResponse, PaymentMethodTokenizationData,
        };

        use super::*;

        type TokenizeIntegration<'a> = BoxedConnectorIntegrationV2<
            'a,
            domain_types::connector_flow::PaymentMethodToken,
            PaymentFlowData,
            PaymentMethodTokenizationData<DefaultPCIHolder>,
            PaymentMethodTokenResponse,
        >;

        fn router_data() -> RouterDataV2<
            domain_types::connector_flow::PaymentMethodToken,
            PaymentFlowData,
            PaymentMethodTokenizationData<DefaultPCIHolder>,
            PaymentMethodTokenResponse,
        > {
            RouterDataV2 {
                flow: PhantomData,
                resource_common_data: payment_flow_data(),
                connector_auth_type: signature_auth(),
                request: PaymentMethodTokenizationData {
                    payment_method_data: PaymentMethodData::Card(test_card()),
                    browser_info: None,
                    currency: Currency::USD,
                    amount: MinorUnit::new(0),
                },
                response: Err(ErrorResponse::default()),
            }
        }

        #[test]
        fn builds_tokenize_request() {
            let req = router_data();
            let connector_data = connector_data();
            let integration: TokenizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let request = integration.build_request_v2(&req).unwrap().unwrap();
            assert_eq!(request.method, Method::Post);
            assert_eq!(
                request.url,
                "https://api.alliedwallet.com/merchants/merchant-42/quickpaytokens"
            );

            let body = masked_body(&request);
            assert!(body.get("cardNumber").is_some());
            assert!(body.get("siteId").is_some());
            assert!(body.get("amount").is_none());
            assert!(body.get("currency").is_none());
            assert!(body.get("trackingId").is_none());
        }

        #[test]
        fn handles_successful_token_response() {
            let req = router_data();
            let connector_data = connector_data();
            let integration: TokenizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(r#"{"id": "quickpay-tok-9", "state": "Successful"}"#, 200),
                    None,
                )
                .unwrap();

            assert_eq!(result.resource_common_data.status, AttemptStatus::Pending);
            let token_response = result.response.unwrap();
            assert_eq!(token_response.token, "quickpay-tok-9");
        }

        #[test]
        fn handles_declined_token_response() {
            let req = router_data();
            let connector_data = connector_data();
            let integration: TokenizeIntegration<'_> =
                connector_data.connector.get_connector_integration_v2();

            let result = integration
                .handle_response_v2(
                    &req,
                    http_response(
                        r#"{"state": "Declined", "message": "Card verification failed"}"#,
                        200,
                    ),
                    None,
                )
                .unwrap();

            let error = result.response.unwrap_err();
            assert_eq!(error.message, "Card verification failed");
            assert_eq!(error.attempt_status, None);
        }
    }
}
