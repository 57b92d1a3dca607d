use domain_types::errors::{ApiError, ApplicationErrorResponse, ConnectorError};

/// Allows [error_stack::Report] to change between error contexts
/// using the dependent [ErrorSwitch] trait to define relations & mappings between traits
pub trait ReportSwitchExt<T, U> {
    /// Switch to the intended report by calling switch
    /// requires error switch to be already implemented on the error type
    fn switch(self) -> Result<T, error_stack::Report<U>>;
}

impl<T, U, V> ReportSwitchExt<T, U> for Result<T, error_stack::Report<V>>
where
    V: ErrorSwitch<U> + error_stack::Context,
    U: error_stack::Context,
{
    #[track_caller]
    fn switch(self) -> Result<T, error_stack::Report<U>> {
        match self {
            Ok(i) => Ok(i),
            Err(er) => {
                let new_c = er.current_context().switch();
                Err(er.change_context(new_c))
            }
        }
    }
}

/// Allow [error_stack::Report] to convert between error types
/// This auto-implements [ReportSwitchExt] for the corresponding errors
pub trait ErrorSwitch<T> {
    /// Get the next error type that the source error can be escalated into
    /// This does not consume the source error since we need to keep it in context
    fn switch(&self) -> T;
}

/// Allow [error_stack::Report] to convert between error types
/// This serves as an alternative to [ErrorSwitch]
pub trait ErrorSwitchFrom<T> {
    /// Convert to an error type that the source can be escalated into
    /// This does not consume the source error since we need to keep it in context
    fn switch_from(error: &T) -> Self;
}

impl<T, S> ErrorSwitch<T> for S
where
    T: ErrorSwitchFrom<Self>,
{
    fn switch(&self) -> T {
        T::switch_from(self)
    }
}

impl ErrorSwitch<ApplicationErrorResponse> for ConnectorError {
    fn switch(&self) -> ApplicationErrorResponse {
        match self {
            ConnectorError::RequestEncodingFailed
            | ConnectorError::ResponseDeserializationFailed
            | ConnectorError::ProcessingStepFailed(_)
            | ConnectorError::FailedToObtainAuthType
            | ConnectorError::AmountConversionFailed => {
                ApplicationErrorResponse::InternalServerError(ApiError {
                    sub_code: "INTERNAL_SERVER_ERROR".to_string(),
                    error_identifier: 500,
                    error_message: self.to_string(),
                    error_object: None,
                })
            }
            ConnectorError::MissingRequiredField { .. }
            | ConnectorError::MaxFieldLengthViolated { .. } => {
                ApplicationErrorResponse::BadRequest(ApiError {
                    sub_code: "BAD_REQUEST".to_string(),
                    error_identifier: 400,
                    error_message: self.to_string(),
                    error_object: None,
                })
            }
            ConnectorError::MissingConnectorTransactionID => {
                ApplicationErrorResponse::Unprocessable(ApiError {
                    sub_code: "UNPROCESSABLE_ENTITY".to_string(),
                    error_identifier: 422,
                    error_message: self.to_string(),
                    error_object: None,
                })
            }
            ConnectorError::NotImplemented(_)
            | ConnectorError::NotSupported { .. }
            | ConnectorError::CaptureMethodNotSupported => {
                ApplicationErrorResponse::NotImplemented(ApiError {
                    sub_code: "NOT_IMPLEMENTED".to_string(),
                    error_identifier: 501,
                    error_message: self.to_string(),
                    error_object: None,
                })
            }
        }
    }
}
