//! Amount units shared between the core and the connector layer.

use std::{fmt::Display, str::FromStr};

use common_enums::enums;
use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};

use crate::errors::ParsingError;

/// Conversion between the core [`MinorUnit`] amount and the representation a
/// processor expects on the wire.
pub trait AmountConvertor: Send {
    /// Wire representation produced by this convertor
    type Output;
    /// Convert the core minor-unit amount into the wire representation.
    fn convert(
        &self,
        amount: MinorUnit,
        currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>>;

    /// Convert a wire amount back into the core minor unit.
    fn convert_back(
        &self,
        amount: Self::Output,
        currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>>;
}

/// Convertor for processors that take major-unit decimal strings
/// (`"400.00"`).
#[derive(Default, Debug, serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq)]
pub struct StringMajorUnitForConnector;

impl AmountConvertor for StringMajorUnitForConnector {
    type Output = StringMajorUnit;
    fn convert(
        &self,
        amount: MinorUnit,
        currency: enums::Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>> {
        amount.to_major_unit_as_string(currency)
    }

    fn convert_back(
        &self,
        amount: StringMajorUnit,
        currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        amount.to_minor_unit_as_i64(currency)
    }
}

/// The unit in which core amounts are held: the smallest denomination of the
/// currency (cents, paise, yen).
#[derive(
    Default,
    Debug,
    serde::Deserialize,
    serde::Serialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
)]
pub struct MinorUnit(pub i64);

impl MinorUnit {
    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// gets amount as i64 value
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// Convert the amount to its major denomination based on Currency and
    /// return a formatted String
    fn to_major_unit_as_string(
        self,
        currency: enums::Currency,
    ) -> Result<StringMajorUnit, error_stack::Report<ParsingError>> {
        let amount_f64 = self.to_major_unit_as_f64(currency)?;
        let amount_string = if currency.is_zero_decimal_currency() {
            amount_f64.0.to_string()
        } else if currency.is_three_decimal_currency() {
            format!("{:.3}", amount_f64.0)
        } else {
            format!("{:.2}", amount_f64.0)
        };
        Ok(StringMajorUnit::new(amount_string))
    }

    /// Convert the amount to its major denomination based on Currency and
    /// return f64
    fn to_major_unit_as_f64(
        self,
        currency: enums::Currency,
    ) -> Result<FloatMajorUnit, error_stack::Report<ParsingError>> {
        let amount_decimal =
            Decimal::from_i64(self.0).ok_or(ParsingError::I64ToDecimalConversionFailure)?;

        let amount = if currency.is_zero_decimal_currency() {
            amount_decimal
        } else if currency.is_three_decimal_currency() {
            amount_decimal / Decimal::from(1000)
        } else {
            amount_decimal / Decimal::from(100)
        };
        let amount_f64 = amount
            .to_f64()
            .ok_or(ParsingError::FloatToDecimalConversionFailure)?;
        Ok(FloatMajorUnit::new(amount_f64))
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A major-unit amount as f64, the intermediate of string formatting.
#[derive(Default, Debug, serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq)]
pub struct FloatMajorUnit(f64);

impl FloatMajorUnit {
    fn new(value: f64) -> Self {
        Self(value)
    }
}

/// A major-unit amount formatted as a decimal string, ready for the wire.
#[derive(Default, Debug, serde::Deserialize, serde::Serialize, Clone, PartialEq, Eq)]
pub struct StringMajorUnit(String);

impl StringMajorUnit {
    fn new(value: String) -> Self {
        Self(value)
    }

    /// Converts to minor unit as i64 from StringMajorUnit
    fn to_minor_unit_as_i64(
        &self,
        currency: enums::Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        let amount_decimal = Decimal::from_str(&self.0).map_err(|e| {
            ParsingError::StringToDecimalConversionFailure {
                error: e.to_string(),
            }
        })?;

        let amount = if currency.is_zero_decimal_currency() {
            amount_decimal
        } else if currency.is_three_decimal_currency() {
            amount_decimal * Decimal::from(1000)
        } else {
            amount_decimal * Decimal::from(100)
        };
        let amount_i64 = amount
            .to_i64()
            .ok_or(ParsingError::DecimalToI64ConversionFailure)?;
        Ok(MinorUnit::new(amount_i64))
    }

    /// Get the string amount
    pub fn get_amount_as_string(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod amount_conversion_tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    const CONVERTOR: StringMajorUnitForConnector = StringMajorUnitForConnector;

    #[test]
    fn two_decimal_currencies_format_with_two_places() {
        let amount = CONVERTOR
            .convert(MinorUnit::new(40000), enums::Currency::USD)
            .unwrap();
        assert_eq!(amount.get_amount_as_string(), "400.00");

        let amount = CONVERTOR
            .convert(MinorUnit::new(101), enums::Currency::EUR)
            .unwrap();
        assert_eq!(amount.get_amount_as_string(), "1.01");
    }

    #[test]
    fn zero_decimal_currencies_keep_the_unscaled_value() {
        let amount = CONVERTOR
            .convert(MinorUnit::new(400), enums::Currency::JPY)
            .unwrap();
        assert_eq!(amount.get_amount_as_string(), "400");
    }

    #[test]
    fn three_decimal_currencies_format_with_three_places() {
        let amount = CONVERTOR
            .convert(MinorUnit::new(400), enums::Currency::KWD)
            .unwrap();
        assert_eq!(amount.get_amount_as_string(), "0.400");
    }

    #[test]
    fn convert_back_restores_the_minor_amount() {
        let amount = CONVERTOR
            .convert(MinorUnit::new(40099), enums::Currency::USD)
            .unwrap();
        let restored = CONVERTOR
            .convert_back(amount, enums::Currency::USD)
            .unwrap();
        assert_eq!(restored, MinorUnit::new(40099));
    }
}
