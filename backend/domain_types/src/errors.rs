use serde_json::Value;

pub use common_utils::errors::ParsingError;

/// Errors surfaced while talking to the processor or while preparing a
/// request for it.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to execute a processing step: {0:?}")]
    ProcessingStepFailed(Option<bytes::Bytes>),
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("This step has not been implemented for: {0}")]
    NotImplemented(String),
    #[error("{message} is not supported by {connector}")]
    NotSupported {
        message: String,
        connector: &'static str,
    },
    #[error("Capture method not supported")]
    CaptureMethodNotSupported,
    #[error("Missing connector transaction ID")]
    MissingConnectorTransactionID,
    #[error("Failed to convert amount to required type")]
    AmountConversionFailed,
    #[error("Field {field_name} exceeds allowed maximum length of {max_length} for connector {connector}, received length {received_length}")]
    MaxFieldLengthViolated {
        connector: String,
        field_name: String,
        max_length: usize,
        received_length: usize,
    },
}

/// Errors raised by the HTTP client layer before a connector ever sees the
/// response.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ApiClientError {
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("URL encoding of request payload failed")]
    UrlEncodingFailed,
    #[error("Failed to send request to connector {0}")]
    RequestNotSent(String),
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("Server responded with unexpected response")]
    UnexpectedServerResponse,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiError {
    pub sub_code: String,
    pub error_identifier: u16,
    pub error_message: String,
    pub error_object: Option<Value>,
}

/// Error shape handed back across the gateway boundary.
#[derive(Debug, Clone, serde::Serialize, thiserror::Error)]
pub enum ApplicationErrorResponse {
    #[error("BadRequest: {0:?}")]
    BadRequest(ApiError),
    #[error("Unauthorized: {0:?}")]
    Unauthorized(ApiError),
    #[error("Unprocessable: {0:?}")]
    Unprocessable(ApiError),
    #[error("InternalServerError: {0:?}")]
    InternalServerError(ApiError),
    #[error("NotImplemented: {0:?}")]
    NotImplemented(ApiError),
}

impl ApplicationErrorResponse {
    pub fn get_api_error(&self) -> &ApiError {
        match self {
            Self::BadRequest(api_error)
            | Self::Unauthorized(api_error)
            | Self::Unprocessable(api_error)
            | Self::InternalServerError(api_error)
            | Self::NotImplemented(api_error) => api_error,
        }
    }
}
