//! Common ID types

use std::{borrow::Cow, fmt::Debug};

use serde::{Deserialize, Serialize};

use crate::consts::{
    MAX_ALLOWED_MERCHANT_REFERENCE_ID_LENGTH, MIN_REQUIRED_MERCHANT_REFERENCE_ID_LENGTH,
};

/// A type for ids restricted to ascii alphanumerics plus `_` and `-`.
#[derive(Debug, PartialEq, Hash, Serialize, Clone, Eq)]
pub(crate) struct AlphaNumericId(String);

/// The error type for [`AlphaNumericId`]
#[derive(Debug, Deserialize, Hash, Serialize, thiserror::Error, Eq, PartialEq)]
#[error("value `{0}` contains invalid character `{1}`")]
pub(crate) struct AlphaNumericIdError(String, char);

impl<'de> Deserialize<'de> for AlphaNumericId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let deserialized_string = String::deserialize(deserializer)?;
        Self::from(deserialized_string.into()).map_err(serde::de::Error::custom)
    }
}

impl AlphaNumericId {
    /// Creates a new alphanumeric id from a string after validating its
    /// characters.
    pub(crate) fn from(input_string: Cow<'static, str>) -> Result<Self, AlphaNumericIdError> {
        let invalid_character = input_string
            .chars()
            .find(|char| !char.is_ascii_alphanumeric() && !matches!(char, '_' | '-'));

        if let Some(invalid_character) = invalid_character {
            Err(AlphaNumericIdError(
                input_string.to_string(),
                invalid_character,
            ))?
        }

        Ok(Self(input_string.to_string()))
    }

    /// Create an alphanumeric id skipping validation
    pub(crate) fn new_unchecked(input_string: String) -> Self {
        Self(input_string)
    }
}

/// An id bounded to the [MIN_LENGTH, MAX_LENGTH] character range.
#[derive(Debug, Clone, Serialize, Hash, PartialEq, Eq)]
pub(crate) struct LengthId<const MAX_LENGTH: u8, const MIN_LENGTH: u8>(AlphaNumericId);

/// The error type for [`LengthId`]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum LengthIdError {
    /// Length above the maximum
    #[error("the maximum allowed length for this field is {0}")]
    MaxLengthViolated(u8),
    /// Length below the minimum
    #[error("the minimum required length for this field is {0}")]
    MinLengthViolated(u8),
    /// Character set violation
    #[error("{0}")]
    AlphanumericIdError(#[from] AlphaNumericIdError),
}

impl<const MAX_LENGTH: u8, const MIN_LENGTH: u8> LengthId<MAX_LENGTH, MIN_LENGTH> {
    /// Create a length-bounded id from a validated alphanumeric id
    pub(crate) fn from_alphanumeric_id(
        alphanumeric_id: AlphaNumericId,
    ) -> Result<Self, LengthIdError> {
        let length = alphanumeric_id.0.len();
        if length > usize::from(MAX_LENGTH) {
            return Err(LengthIdError::MaxLengthViolated(MAX_LENGTH));
        }
        if length < usize::from(MIN_LENGTH) {
            return Err(LengthIdError::MinLengthViolated(MIN_LENGTH));
        }
        Ok(Self(alphanumeric_id))
    }

    /// Create a length-bounded id from a raw string, validating both the
    /// character set and the length.
    pub(crate) fn from(input_string: Cow<'static, str>) -> Result<Self, LengthIdError> {
        let alphanumeric_id = AlphaNumericId::from(input_string)?;
        Self::from_alphanumeric_id(alphanumeric_id)
    }

    /// Create a length-bounded id skipping all validation
    pub(crate) fn new_unchecked(input_string: String) -> Self {
        Self(AlphaNumericId::new_unchecked(input_string))
    }
}

impl<'de, const MAX_LENGTH: u8, const MIN_LENGTH: u8> Deserialize<'de>
    for LengthId<MAX_LENGTH, MIN_LENGTH>
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let deserialized_string = String::deserialize(deserializer)?;
        Self::from(deserialized_string.into()).map_err(serde::de::Error::custom)
    }
}

/// Identifier for a merchant account.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub struct MerchantId(
    LengthId<MAX_ALLOWED_MERCHANT_REFERENCE_ID_LENGTH, MIN_REQUIRED_MERCHANT_REFERENCE_ID_LENGTH>,
);

impl Default for MerchantId {
    fn default() -> Self {
        Self(LengthId::new_unchecked("merchant_default".to_string()))
    }
}

impl MerchantId {
    /// Get the string form of the merchant id
    pub fn get_string_repr(&self) -> &str {
        &self.0 .0 .0
    }

    /// Wrap a pre-validated merchant id without running the checks again
    pub fn new_unchecked(merchant_id: String) -> Self {
        Self(LengthId::new_unchecked(merchant_id))
    }
}

impl TryFrom<Cow<'static, str>> for MerchantId {
    type Error = error_stack::Report<crate::errors::ValidationError>;

    fn try_from(value: Cow<'static, str>) -> Result<Self, Self::Error> {
        use error_stack::ResultExt;

        let merchant_id = LengthId::from(value).change_context(
            crate::errors::ValidationError::IncorrectValueProvided {
                field_name: "merchant_id",
            },
        )?;
        Ok(Self(merchant_id))
    }
}

/// Identifier for a customer.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub struct CustomerId(
    LengthId<MAX_ALLOWED_MERCHANT_REFERENCE_ID_LENGTH, MIN_REQUIRED_MERCHANT_REFERENCE_ID_LENGTH>,
);

impl Default for CustomerId {
    fn default() -> Self {
        Self(LengthId::new_unchecked("customer_default".to_string()))
    }
}

impl CustomerId {
    /// Get the string form of the customer id
    pub fn get_string_repr(&self) -> &str {
        &self.0 .0 .0
    }
}

impl TryFrom<Cow<'static, str>> for CustomerId {
    type Error = error_stack::Report<crate::errors::ValidationError>;

    fn try_from(value: Cow<'static, str>) -> Result<Self, Self::Error> {
        use error_stack::ResultExt;

        let customer_id = LengthId::from(value).change_context(
            crate::errors::ValidationError::IncorrectValueProvided {
                field_name: "customer_id",
            },
        )?;
        Ok(Self(customer_id))
    }
}

#[cfg(test)]
mod id_type_tests {
    #![allow(clippy::unwrap_used)]

    use std::borrow::Cow;

    use super::*;

    #[test]
    fn valid_merchant_id_roundtrip() {
        let merchant_id = MerchantId::try_from(Cow::from("merchant_1234")).unwrap();
        assert_eq!(merchant_id.get_string_repr(), "merchant_1234");
    }

    #[test]
    fn merchant_id_rejects_invalid_characters() {
        assert!(MerchantId::try_from(Cow::from("merchant id")).is_err());
        assert!(MerchantId::try_from(Cow::from("merchant/../id")).is_err());
    }

    #[test]
    fn merchant_id_rejects_empty_and_oversized() {
        assert!(MerchantId::try_from(Cow::from("")).is_err());
        assert!(MerchantId::try_from(Cow::from("a".repeat(65))).is_err());
    }

    #[test]
    fn customer_id_deserializes_from_json_string() {
        let customer_id: CustomerId = serde_json::from_str(r#""cust_99""#).unwrap();
        assert_eq!(customer_id.get_string_repr(), "cust_99");
    }
}
