//! Personal Identifiable Information protection.

use std::{fmt, ops, str::FromStr};

use masking::{Secret, Strategy, WithType};
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, validation::validate_email};

/// Strategy for Encryption
#[derive(Debug)]
pub enum EmailStrategy {}

impl<T> Strategy<T> for EmailStrategy
where
    T: AsRef<str>,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();
        match val_str.split_once('@') {
            Some((a, b)) => write!(f, "{}@{}", "*".repeat(a.len()), b),
            None => WithType::fmt(val, f),
        }
    }
}

/// Email address
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Email(Secret<String, EmailStrategy>);

impl ops::Deref for Email {
    type Target = Secret<String, EmailStrategy>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Email {
    type Err = error_stack::Report<ValidationError>;

    fn from_str(email: &str) -> Result<Self, Self::Err> {
        validate_email(email)?;
        Ok(Self(Secret::new(email.to_string())))
    }
}

impl TryFrom<String> for Email {
    type Error = error_stack::Report<ValidationError>;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}
