use std::{str::FromStr, time::Duration};

use common_utils::{
    ext_traits::AsyncExt,
    request::{Headers, Method, Request, RequestContent},
    CustomResult,
};
use domain_types::{
    connector_types::{ConnectorResponseHeaders, RawConnectorRequestResponse},
    errors::{ApiClientError, ConnectorError},
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::{HasConnectors, Proxy},
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{ErasedMaskSerialize, Maskable, Secret};
use interfaces::connector_integration_v2::BoxedConnectorIntegrationV2;
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::field::Empty;

/// Drive one connector flow end to end: build the request, send it over
/// HTTP, and hand the processor's answer back to the connector for
/// interpretation.
///
/// A non-2xx status is not an error of this function; it is mapped through
/// the connector's error response handling and lands in
/// `router_data.response`. Only transport failures and connector bugs
/// surface as `Err`.
#[tracing::instrument(
    name = "execute_connector_processing_step",
    skip_all,
    fields(
        connector = %connector_name,
        service = %service_name,
        request.headers = Empty,
        request.body = Empty,
        request.url = Empty,
        request.method = Empty,
        response.body = Empty,
        response.headers = Empty,
        response.error_message = Empty,
        response.status_code = Empty,
        message_ = "Golden Log Line (outgoing)",
        latency = Empty,
    )
)]
pub async fn execute_connector_processing_step<F, ResourceCommonData, Req, Resp>(
    proxy: &Proxy,
    connector: BoxedConnectorIntegrationV2<'static, F, ResourceCommonData, Req, Resp>,
    router_data: RouterDataV2<F, ResourceCommonData, Req, Resp>,
    all_keys_required: Option<bool>,
    connector_name: &str,
    service_name: &str,
) -> CustomResult<RouterDataV2<F, ResourceCommonData, Req, Resp>, ConnectorError>
where
    F: Clone + 'static,
    Req: Clone + std::fmt::Debug + 'static,
    Resp: Clone + std::fmt::Debug + 'static,
    ResourceCommonData: HasConnectors
        + RawConnectorRequestResponse
        + ConnectorResponseHeaders
        + Clone
        + 'static,
{
    let start = tokio::time::Instant::now();
    let connector_request = connector.build_request_v2(&router_data)?;

    let original_headers = connector_request
        .as_ref()
        .map(|connector_request| connector_request.headers.clone())
        .unwrap_or_default();
    let masked_headers = original_headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (k, v)| {
            let value = match v {
                Maskable::Masked(_) => {
                    Value::String("*** alloc::string::String ***".to_string())
                }
                Maskable::Normal(iv) => Value::String(iv.to_owned()),
            };
            acc.insert(k.clone(), value);
            acc
        });
    let headers_for_logging = Value::Object(masked_headers);
    tracing::Span::current().record(
        "request.headers",
        tracing::field::display(&headers_for_logging),
    );

    let mut router_data = router_data;

    let masked_request = connector_request.as_ref().map(|connector_request| {
        let masked_request = match connector_request.body.as_ref() {
            Some(RequestContent::Json(i) | RequestContent::FormUrlEncoded(i)) => (**i)
                .masked_serialize()
                .unwrap_or(json!({ "error": "failed to mask serialize connector request"})),
            Some(RequestContent::RawBytes(_)) => json!({"request_type": "RAW_BYTES"}),
            None => Value::Null,
        };
        tracing::Span::current().record("request.body", tracing::field::display(&masked_request));
        masked_request
    });
    if all_keys_required.unwrap_or(true) {
        if let Some(masked_request) = masked_request.as_ref() {
            router_data
                .resource_common_data
                .set_raw_connector_request(Some(Secret::new(masked_request.to_string())));
        }
    }

    let result = match connector_request {
        Some(request) => {
            let url = request.url.clone();
            let method = request.method;
            tracing::Span::current().record("request.url", tracing::field::display(&url));
            tracing::Span::current().record("request.method", tracing::field::display(method));

            let response = call_connector_api(proxy, request, "execute_connector_processing_step")
                .await
                .change_context(ConnectorError::RequestEncodingFailed);

            match response {
                Ok(body) => {
                    let response = match body {
                        Ok(body) => {
                            tracing::Span::current().record(
                                "response.status_code",
                                tracing::field::display(body.status_code),
                            );
                            if let Ok(response_value) =
                                parse_json_with_bom_handling(&body.response)
                            {
                                let headers = body.headers.clone().unwrap_or_default();
                                let map = headers.iter().fold(
                                    serde_json::Map::new(),
                                    |mut acc, (left, right)| {
                                        let header_value = if right.is_sensitive() {
                                            Value::String(
                                                "*** alloc::string::String ***".to_string(),
                                            )
                                        } else if let Ok(x) = right.to_str() {
                                            Value::String(x.to_string())
                                        } else {
                                            return acc;
                                        };
                                        acc.insert(left.as_str().to_string(), header_value);
                                        acc
                                    },
                                );
                                tracing::Span::current().record(
                                    "response.headers",
                                    tracing::field::display(Value::Object(map)),
                                );
                                tracing::Span::current().record(
                                    "response.body",
                                    tracing::field::display(
                                        response_value.masked_serialize().unwrap_or(
                                            json!({ "error": "failed to mask serialize connector response"}),
                                        ),
                                    ),
                                );
                            }

                            let mut updated_router_data = router_data.clone();
                            if all_keys_required.unwrap_or(true) {
                                let raw_response_string =
                                    strip_bom_and_convert_to_string(&body.response);
                                updated_router_data
                                    .resource_common_data
                                    .set_raw_connector_response(raw_response_string.map(Secret::new));
                                updated_router_data
                                    .resource_common_data
                                    .set_connector_response_headers(body.headers.clone());
                            }

                            connector.handle_response_v2(&updated_router_data, body, None)?
                        }
                        Err(body) => {
                            let mut updated_router_data = router_data.clone();
                            if all_keys_required.unwrap_or(true) {
                                let raw_response_string =
                                    strip_bom_and_convert_to_string(&body.response);
                                updated_router_data
                                    .resource_common_data
                                    .set_raw_connector_response(raw_response_string.map(Secret::new));
                                updated_router_data
                                    .resource_common_data
                                    .set_connector_response_headers(body.headers.clone());
                            }

                            let error = match body.status_code {
                                500..=511 => connector.get_5xx_error_response(body, None)?,
                                _ => connector.get_error_response_v2(body, None)?,
                            };
                            tracing::Span::current().record(
                                "response.error_message",
                                tracing::field::display(&error.message),
                            );
                            tracing::Span::current().record(
                                "response.status_code",
                                tracing::field::display(error.status_code),
                            );
                            updated_router_data.response = Err(error);
                            updated_router_data
                        }
                    };
                    Ok(response)
                }
                Err(err) => {
                    info_log(
                        "NETWORK_ERROR",
                        &json!(format!(
                            "Failed getting response from connector. Error: {:?}",
                            err
                        )),
                    );
                    Err(err.change_context(ConnectorError::ProcessingStepFailed(None)))
                }
            }
        }
        None => Ok(router_data),
    };

    let elapsed = start.elapsed().as_millis();
    tracing::Span::current().record("latency", elapsed);
    tracing::info!(tag = ?Tag::OutgoingApi, log_type = "api", "Outgoing Request completed");
    result
}

pub async fn call_connector_api(
    proxy: &Proxy,
    request: Request,
    _flow_name: &str,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;

    let should_bypass_proxy = proxy.bypass_proxy_urls.contains(&url.to_string());

    let client = create_client(
        proxy,
        should_bypass_proxy,
        request.certificate,
        request.certificate_key,
    )?;

    let headers = request.headers.construct_header_map()?;

    let request = {
        match request.method {
            Method::Get => client.get(url),
            Method::Post => {
                let client = client.post(url);
                match request.body {
                    Some(RequestContent::Json(payload)) => client.json(&payload),
                    Some(RequestContent::FormUrlEncoded(payload)) => client.form(&payload),
                    Some(RequestContent::RawBytes(payload)) => client.body(payload),
                    None => client,
                }
            }
            _ => client.post(url),
        }
        .add_headers(headers)
    };

    let response = request.send().await.map_err(|error| {
        let api_error = match error {
            error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
            _ => ApiClientError::RequestNotSent(error.to_string()),
        };
        info_log(
            "REQUEST_FAILURE",
            &json!("Unable to send request to connector."),
        );
        report!(api_error)
    });

    handle_response(response).await
}

pub fn create_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
    _client_certificate: Option<Secret<String>>,
    _client_certificate_key: Option<Secret<String>>,
) -> CustomResult<Client, ApiClientError> {
    get_base_client(proxy_config, should_bypass_proxy)
}

static NON_PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();

fn get_base_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    Ok(if should_bypass_proxy
        || (proxy_config.http_url.is_none() && proxy_config.https_url.is_none())
    {
        &NON_PROXIED_CLIENT
    } else {
        &PROXIED_CLIENT
    }
    .get_or_try_init(|| {
        get_client_builder(proxy_config, should_bypass_proxy)?
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)
            .inspect_err(|err| {
                info_log(
                    "ERROR",
                    &json!(format!("Failed to construct base client. Error: {:?}", err)),
                );
            })
    })?
    .clone())
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if should_bypass_proxy {
        return Ok(client_builder);
    }

    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTPS proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTP proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    Ok(client_builder)
}

async fn handle_response(
    response: CustomResult<reqwest::Response, ApiClientError>,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    response
        .async_map(|resp| async {
            let status_code = resp.status().as_u16();
            let headers = Some(resp.headers().to_owned());
            match status_code {
                200..=202 | 204 | 302 => {
                    let response = resp
                        .bytes()
                        .await
                        .change_context(ApiClientError::ResponseDecodingFailed)?;
                    Ok(Ok(Response {
                        headers,
                        response,
                        status_code,
                    }))
                }
                400..=599 => {
                    let bytes = resp.bytes().await.map_err(|error| {
                        report!(error).change_context(ApiClientError::ResponseDecodingFailed)
                    })?;

                    Ok(Err(Response {
                        headers,
                        response: bytes,
                        status_code,
                    }))
                }
                _ => {
                    info_log(
                        "UNEXPECTED_RESPONSE",
                        &json!("Unexpected response from server."),
                    );
                    Err(report!(ApiClientError::UnexpectedServerResponse))
                }
            }
        })
        .await?
}

/// Decode response bytes to a string, dropping a UTF-8 BOM if one is
/// present. Some processors prefix their JSON with one.
fn strip_bom_and_convert_to_string(response_bytes: &[u8]) -> Option<String> {
    String::from_utf8(response_bytes.to_vec()).ok().map(|s| {
        if s.starts_with('\u{FEFF}') {
            s.trim_start_matches('\u{FEFF}').to_string()
        } else {
            s
        }
    })
}

fn parse_json_with_bom_handling(response_bytes: &[u8]) -> Result<Value, serde_json::Error> {
    match serde_json::from_slice::<Value>(response_bytes) {
        Ok(value) => Ok(value),
        Err(_) => {
            let cleaned_response = if response_bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
                &response_bytes[3..]
            } else {
                response_bytes
            };
            serde_json::from_slice::<Value>(cleaned_response)
        }
    }
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

pub(super) trait RequestBuilderExt {
    fn add_headers(self, headers: reqwest::header::HeaderMap) -> Self;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn add_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self = self.headers(headers);
        self
    }
}

#[derive(Debug, Default, serde::Deserialize, Clone, strum::EnumString)]
pub enum Tag {
    /// General.
    #[default]
    General,
    /// API: incoming web request.
    ApiIncomingRequest,
    /// Call initiated to connector.
    InitiatedToConnector,
    /// Incoming response.
    IncomingApi,
    /// Api Outgoing Request.
    OutgoingApi,
    /// End Request.
    EndRequest,
}

#[inline]
pub fn debug_log(action: &str, message: &Value) {
    tracing::debug!(tags = %action, json_value= %message);
}

#[inline]
pub fn info_log(action: &str, message: &Value) {
    tracing::info!(tags = %action, json_value= %message);
}

#[inline]
pub fn error_log(action: &str, message: &Value) {
    tracing::error!(tags = %action, json_value= %message);
}

#[inline]
pub fn warn_log(action: &str, message: &Value) {
    tracing::warn!(tags = %action, json_value= %message);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use hyperswitch_masking::Mask;

    use super::*;

    #[test]
    fn bom_is_stripped_from_response_strings() {
        let with_bom = b"\xEF\xBB\xBF{\"state\": \"Successful\"}";
        assert_eq!(
            strip_bom_and_convert_to_string(with_bom).as_deref(),
            Some("{\"state\": \"Successful\"}")
        );

        let without_bom = b"{\"state\": \"Successful\"}";
        assert_eq!(
            strip_bom_and_convert_to_string(without_bom).as_deref(),
            Some("{\"state\": \"Successful\"}")
        );
    }

    #[test]
    fn json_parsing_survives_a_bom_prefix() {
        let with_bom = b"\xEF\xBB\xBF{\"id\": \"txn_1\"}";
        let value = parse_json_with_bom_handling(with_bom).unwrap();
        assert_eq!(value["id"], "txn_1");
    }

    #[test]
    fn invalid_utf8_yields_no_raw_response() {
        assert!(strip_bom_and_convert_to_string(&[0xFF, 0xFE, 0x00]).is_none());
    }

    #[test]
    fn header_map_construction_keeps_masked_values() {
        let mut headers = Headers::new();
        headers.insert((
            "Content-Type".to_string(),
            "application/json".to_string().into(),
        ));
        headers.insert((
            "Authorization".to_string(),
            "Bearer oauth-token".to_string().into_masked(),
        ));

        let header_map = headers.construct_header_map().unwrap();
        assert_eq!(header_map.get("content-type").unwrap(), "application/json");
        assert_eq!(
            header_map.get("authorization").unwrap(),
            "Bearer oauth-token"
        );
    }
}
