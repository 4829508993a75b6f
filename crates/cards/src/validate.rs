use std::{fmt, ops::Deref, str::FromStr};

#[cfg(not(target_arch = "wasm32"))]
use gateway_env::logger;
use masking::{PeekInterface, Secret, Strategy, WithType};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Deserialize, Serialize, Error)]
#[error("not a valid credit card number")]
pub struct CCValError;

impl From<core::convert::Infallible> for CCValError {
    fn from(_: core::convert::Infallible) -> Self {
        Self
    }
}

/// Card number
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CardNumber(Secret<String, CardNumberStrategy>);

impl CardNumber {
    /// Full card number, for building connector payloads
    pub fn get_card_no(&self) -> Secret<String> {
        Secret::new(self.0.peek().clone())
    }

    /// Whether the number passes the Luhn checksum. The gateway decides acceptance, so this is
    /// advisory only.
    pub fn is_luhn_valid(&self) -> bool {
        luhn::valid(self.0.peek())
    }
}

impl FromStr for CardNumber {
    type Err = CCValError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cc_no_whitespace: String = s.split_whitespace().collect();
        let well_formed = (12..=19).contains(&cc_no_whitespace.len())
            && cc_no_whitespace.bytes().all(|b| b.is_ascii_digit());
        match well_formed {
            true => Ok(Self(Secret::from_str(&cc_no_whitespace)?)),
            false => Err(CCValError),
        }
    }
}

impl TryFrom<String> for CardNumber {
    type Error = CCValError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl Deref for CardNumber {
    type Target = Secret<String, CardNumberStrategy>;

    fn deref(&self) -> &Secret<String, CardNumberStrategy> {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CardNumber {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

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

        if let Some(value) = val_str.get(..6) {
            write!(f, "{}{}", value, "*".repeat(val_str.len() - 6))
        } else {
            #[cfg(not(target_arch = "wasm32"))]
            logger::error!("Invalid card number {val_str}");
            WithType::fmt(val, f)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn valid_card_number() {
        let s = "4444333322221111";
        assert_eq!(
            CardNumber::from_str(s).unwrap(),
            CardNumber(Secret::from_str(s).unwrap())
        );
    }

    #[test]
    fn luhn_failure_is_still_a_card_number() {
        let card_number = CardNumber::from_str("4646464646464646").unwrap();
        assert_eq!(card_number.get_card_no().peek(), "4646464646464646");
        assert!(!card_number.is_luhn_valid());
        assert!(CardNumber::from_str("4444333322221111")
            .unwrap()
            .is_luhn_valid());
    }

    #[test]
    fn invalid_card_number() {
        for s in ["4111-1111-1111-1111", "12345678901", "41111111111111111111", ""] {
            assert_eq!(
                CardNumber::from_str(s).unwrap_err().to_string(),
                "not a valid credit card number".to_string()
            );
        }
    }

    #[test]
    fn card_number_no_whitespace() {
        let card_number = CardNumber::from_str("4444 3333 2222 1111").unwrap();
        assert_eq!(card_number.get_card_no().peek(), "4444333322221111");
    }

    #[test]
    fn test_valid_card_number_masking() {
        let secret: Secret<String, CardNumberStrategy> =
            Secret::new("1234567890987654".to_string());
        assert_eq!("123456**********", format!("{secret:?}"));
    }

    #[test]
    fn test_invalid_card_number_masking() {
        let secret: Secret<String, CardNumberStrategy> = Secret::new("1234567890".to_string());
        assert_eq!("*** alloc::string::String ***", format!("{secret:?}"));
    }

    #[test]
    fn test_valid_card_number_deserialization() {
        let card_number = serde_json::from_str::<CardNumber>(r#""4444 3333 2222 1111""#).unwrap();
        assert_eq!("444433**********", format!("{:?}", *card_number));
    }

    #[test]
    fn test_invalid_card_number_deserialization() {
        let card_number = serde_json::from_str::<CardNumber>(r#""1234 5678""#);
        let error_msg = card_number.unwrap_err().to_string();
        assert_eq!(error_msg, "not a valid credit card number".to_string());
    }
}
