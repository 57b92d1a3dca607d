use std::{fmt, ops::Deref, str::FromStr};

use error_stack::Report;
use hyperswitch_masking::{PeekInterface, Strategy, StrongSecret, WithType};
use serde::{Deserialize, Deserializer, Serialize};

/// Failures of card number validation.
#[derive(Debug, thiserror::Error)]
pub enum CardNumberValidationErr {
    /// Luhn checksum failed
    #[error("card number invalid")]
    InvalidCardNumber,
    /// Card number is too short or too long
    #[error("invalid card number length")]
    InvalidCardNumberLength,
    /// Card number contains a non-digit character
    #[error("card number contains non digit character")]
    ContainsNonDigit,
}

/// A validated payment card number. Serializes to the plain number for wire
/// payloads; Debug and masked serialization only reveal the first six
/// digits.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CardNumber(StrongSecret<String, CardNumberStrategy>);

impl CardNumber {
    /// First six digits, the issuer identification number.
    pub fn get_card_isin(&self) -> String {
        self.0.peek().chars().take(6).collect()
    }

    /// Last four digits, as shown on receipts.
    pub fn get_last4(&self) -> String {
        self.0
            .peek()
            .chars()
            .rev()
            .take(4)
            .collect::<String>()
            .chars()
            .rev()
            .collect()
    }

    /// The full card number.
    pub fn get_card_no(&self) -> String {
        self.0.peek().clone()
    }
}

impl FromStr for CardNumber {
    type Err = Report<CardNumberValidationErr>;

    fn from_str(card_number: &str) -> Result<Self, Self::Err> {
        // Spaces and hyphens are presentation, not payload
        let card_number: String = card_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        if !card_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(CardNumberValidationErr::ContainsNonDigit.into());
        }
        if !(12..=19).contains(&card_number.len()) {
            return Err(CardNumberValidationErr::InvalidCardNumberLength.into());
        }
        if !luhn(&card_number) {
            return Err(CardNumberValidationErr::InvalidCardNumber.into());
        }
        Ok(Self(StrongSecret::new(card_number)))
    }
}

impl TryFrom<String> for CardNumber {
    type Error = Report<CardNumberValidationErr>;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl<'de> Deserialize<'de> for CardNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let card_number = String::deserialize(deserializer)?;
        card_number.parse().map_err(serde::de::Error::custom)
    }
}

impl Deref for CardNumber {
    type Target = StrongSecret<String, CardNumberStrategy>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Default for CardNumber {
    fn default() -> Self {
        Self(StrongSecret::new(String::new()))
    }
}

/// Masking strategy keeping the issuer identification number visible.
#[derive(Debug)]
pub enum CardNumberStrategy {}

impl<T> Strategy<T> for CardNumberStrategy
where
    T: AsRef<str>,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();
        if val_str.len() < 15 || val_str.len() > 19 {
            return WithType::fmt(val, f);
        }
        write!(f, "{}{}", &val_str[..6], "*".repeat(val_str.len() - 6))
    }
}

fn luhn(number: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;
    for ch in number.chars().rev() {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };
        sum += if double {
            let doubled = digit * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            digit
        };
        double = !double;
    }
    sum % 10 == 0
}

#[cfg(test)]
mod card_number_tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn valid_card_number_parses() {
        let card = CardNumber::from_str("4111111111111111").unwrap();
        assert_eq!(card.get_card_no(), "4111111111111111");
        assert_eq!(card.get_card_isin(), "411111");
        assert_eq!(card.get_last4(), "1111");
    }

    #[test]
    fn spaces_and_hyphens_are_stripped() {
        let card = CardNumber::from_str("4111 1111-1111 1111").unwrap();
        assert_eq!(card.get_card_no(), "4111111111111111");
    }

    #[test]
    fn luhn_failure_is_rejected() {
        assert!(CardNumber::from_str("4111111111111112").is_err());
    }

    #[test]
    fn non_digits_are_rejected() {
        assert!(CardNumber::from_str("41111111x1111111").is_err());
    }

    #[test]
    fn invalid_length_is_rejected() {
        assert!(CardNumber::from_str("41111").is_err());
        assert!(CardNumber::from_str("41111111111111111111111").is_err());
    }

    #[test]
    fn debug_masks_all_but_the_isin() {
        let secret: StrongSecret<String, CardNumberStrategy> =
            StrongSecret::new("4111111111111111".to_string());
        assert_eq!(format!("{secret:?}"), "411111**********");
    }

    #[test]
    fn debug_hides_unmaskable_lengths_entirely() {
        let secret: StrongSecret<String, CardNumberStrategy> =
            StrongSecret::new("411111".to_string());
        assert_eq!(format!("{secret:?}"), "*** alloc::string::String ***");
    }

    #[test]
    fn deserialization_validates() {
        let ok: Result<CardNumber, _> = serde_json::from_str(r#""4012888888881881""#);
        assert!(ok.is_ok());
        let bad: Result<CardNumber, _> = serde_json::from_str(r#""1234567890123456""#);
        assert!(bad.is_err());
    }
}
