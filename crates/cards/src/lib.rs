pub mod validate;

use common_utils::errors;
use error_stack::report;
use masking::{PeekInterface, Secret, WithoutType};
use serde::{Deserialize, Serialize};

pub use crate::validate::{CCValError, CardNumber, CardNumberStrategy};

/// Card verification number, three or four digits
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct CardSecurityCode(Secret<String, WithoutType>);

impl CardSecurityCode {
    pub fn new(secret: Secret<String, WithoutType>) -> errors::CustomResult<Self, errors::ValidationError> {
        let csc = secret.peek();

        if (3..=4).contains(&csc.len()) && csc.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(secret))
        } else {
            Err(report!(errors::ValidationError::InvalidValue {
                message: "invalid card security code".to_string()
            }))
        }
    }
}

impl TryFrom<String> for CardSecurityCode {
    type Error = error_stack::Report<errors::ValidationError>;

    fn try_from(csc: String) -> Result<Self, Self::Error> {
        Self::new(Secret::new(csc))
    }
}

impl TryFrom<&str> for CardSecurityCode {
    type Error = error_stack::Report<errors::ValidationError>;

    fn try_from(csc: &str) -> Result<Self, Self::Error> {
        Self::new(Secret::new(csc.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct CardExpirationMonth(Secret<u8>);

impl CardExpirationMonth {
    pub fn new(secret: Secret<u8>) -> errors::CustomResult<Self, errors::ValidationError> {
        let month = secret.peek();

        if (1..=12).contains(month) {
            Ok(Self(secret))
        } else {
            Err(report!(errors::ValidationError::InvalidValue {
                message: "invalid card expiration month".to_string()
            }))
        }
    }

    /// Month zero padded to two digits, `9` becomes `"09"`
    pub fn two_digits(&self) -> Secret<String> {
        Secret::new(format!("{:02}", self.0.peek()))
    }
}

impl TryFrom<u8> for CardExpirationMonth {
    type Error = error_stack::Report<errors::ValidationError>;

    fn try_from(month: u8) -> Result<Self, Self::Error> {
        Self::new(Secret::new(month))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16")]
pub struct CardExpirationYear(Secret<u16>);

impl CardExpirationYear {
    pub fn new(secret: Secret<u16>) -> errors::CustomResult<Self, errors::ValidationError> {
        let year = secret.peek();

        if (1997..=9999).contains(year) {
            Ok(Self(secret))
        } else {
            Err(report!(errors::ValidationError::InvalidValue {
                message: "invalid card expiration year".to_string()
            }))
        }
    }

    /// Last two digits of the year, `2013` becomes `"13"`
    pub fn two_digits(&self) -> Secret<String> {
        Secret::new(format!("{:02}", self.0.peek() % 100))
    }
}

impl TryFrom<u16> for CardExpirationYear {
    type Error = error_stack::Report<errors::ValidationError>;

    fn try_from(year: u16) -> Result<Self, Self::Error> {
        Self::new(Secret::new(year))
    }
}

impl PeekInterface<Secret<String, WithoutType>> for CardSecurityCode {
    fn peek(&self) -> &Secret<String, WithoutType> {
        &self.0
    }
}

impl PeekInterface<Secret<u8>> for CardExpirationMonth {
    fn peek(&self) -> &Secret<u8> {
        &self.0
    }
}

impl PeekInterface<Secret<u16>> for CardExpirationYear {
    fn peek(&self) -> &Secret<u16> {
        &self.0
    }
}
