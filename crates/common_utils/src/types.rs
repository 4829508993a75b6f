//! Types that can be used in other crates

use std::fmt::Display;

use error_stack::report;
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, ValidationError};

/// This Unit struct represents MinorUnit in which core amount works
#[derive(
    Default, Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// Wrap an amount already expressed in cents
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connector specific type to send the minor unit amount as a plain digit string
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StringMinorUnit(String);

impl StringMinorUnit {
    /// Borrow the formatted amount
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StringMinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for converting the core minor unit amount into the representation a connector expects
pub trait AmountConvertor: Send {
    /// Output type for the connector
    type Output;
    /// helps in conversion of connector required amount type
    fn convert(&self, amount: MinorUnit) -> CustomResult<Self::Output, ValidationError>;
}

/// Connector required amount type: minor units rendered as a digit string
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct StringMinorUnitForConnector;

impl AmountConvertor for StringMinorUnitForConnector {
    type Output = StringMinorUnit;

    fn convert(&self, amount: MinorUnit) -> CustomResult<Self::Output, ValidationError> {
        if amount.0 < 0 {
            return Err(report!(ValidationError::InvalidValue {
                message: format!("amount must not be negative, got {}", amount.0),
            }));
        }
        Ok(StringMinorUnit(amount.0.to_string()))
    }
}

/// Values a caller may hand in as a transaction amount.
///
/// Only integer counts of minor currency units are accepted. Textual amounts are always rejected,
/// so a caller can never have `"10.34"` silently reinterpreted as 1034 or as 10.
pub trait ToMinorUnit {
    /// Convert into a non-negative [`MinorUnit`]
    fn to_minor_unit(self) -> CustomResult<MinorUnit, ValidationError>;
}

fn non_negative(value: i64) -> CustomResult<MinorUnit, ValidationError> {
    if value < 0 {
        Err(report!(ValidationError::InvalidValue {
            message: format!("amount must not be negative, got {value}"),
        }))
    } else {
        Ok(MinorUnit(value))
    }
}

fn reject_text(value: &str) -> CustomResult<MinorUnit, ValidationError> {
    Err(report!(ValidationError::InvalidValue {
        message: format!("amount must be an integer count of minor units, got {value:?}"),
    }))
}

impl ToMinorUnit for MinorUnit {
    fn to_minor_unit(self) -> CustomResult<MinorUnit, ValidationError> {
        non_negative(self.0)
    }
}

impl ToMinorUnit for i64 {
    fn to_minor_unit(self) -> CustomResult<MinorUnit, ValidationError> {
        non_negative(self)
    }
}

impl ToMinorUnit for i32 {
    fn to_minor_unit(self) -> CustomResult<MinorUnit, ValidationError> {
        non_negative(i64::from(self))
    }
}

impl ToMinorUnit for u32 {
    fn to_minor_unit(self) -> CustomResult<MinorUnit, ValidationError> {
        Ok(MinorUnit(i64::from(self)))
    }
}

impl ToMinorUnit for u64 {
    fn to_minor_unit(self) -> CustomResult<MinorUnit, ValidationError> {
        i64::try_from(self).map(MinorUnit).map_err(|_| {
            report!(ValidationError::InvalidValue {
                message: format!("amount {self} does not fit in minor units"),
            })
        })
    }
}

impl ToMinorUnit for &str {
    fn to_minor_unit(self) -> CustomResult<MinorUnit, ValidationError> {
        reject_text(self)
    }
}

impl ToMinorUnit for String {
    fn to_minor_unit(self) -> CustomResult<MinorUnit, ValidationError> {
        reject_text(&self)
    }
}
