//! Errors and their supporting types shared across the workspace.

/// Custom [`Result`] alias carrying an [`error_stack::Report`] in the error
/// variant.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Errors from parsing or converting values between representations.
#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    /// Failed to parse an enum from its string form
    #[error("Failed to parse enum: {0}")]
    EnumParseFailure(&'static str),
    /// Failed to parse a struct from raw data
    #[error("Failed to parse struct: {0}")]
    StructParseFailure(&'static str),
    /// Failed to serialize to the given format
    #[error("Failed to serialize to {0} format")]
    EncodeError(&'static str),
    /// Failed to parse a URL
    #[error("Failed to parse url")]
    UrlParsingError,
    /// Failed to parse an email address
    #[error("Failed to parse email")]
    EmailParsingError,
    /// Failed to convert an i64 amount to Decimal
    #[error("Failed to convert i64 to Decimal")]
    I64ToDecimalConversionFailure,
    /// Failed to convert a Decimal amount back to i64
    #[error("Failed to convert Decimal to i64")]
    DecimalToI64ConversionFailure,
    /// Failed to convert a String amount to Decimal
    #[error("Failed to convert String value to Decimal: {error}")]
    StringToDecimalConversionFailure {
        /// the underlying decimal parse error
        error: String,
    },
    /// Failed to convert an f64 amount to Decimal
    #[error("Failed to convert f64 value to Decimal")]
    FloatToDecimalConversionFailure,
}

/// Errors from validating user or merchant supplied values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was not provided
    #[error("Missing required field: {field_name}")]
    MissingRequiredField {
        /// name of the absent field
        field_name: String,
    },
    /// The value provided for the field failed validation
    #[error("Incorrect value provided for field: {field_name}")]
    IncorrectValueProvided {
        /// name of the offending field
        field_name: &'static str,
    },
    /// The value is invalid for reasons described in the message
    #[error("{message}")]
    InvalidValue {
        /// description of the violation
        message: String,
    },
}
