use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Normalized outcome of a single connector call.
///
/// A decline is a normal response with `success == false`, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentsResponseData {
    pub success: bool,
    /// Human readable gateway message
    pub message: String,
    /// Every leaf field of the gateway reply, keyed by its lower-cased tag name
    pub params: IndexMap<String, String>,
    /// Gateway transaction reference, used as the handle for a later refund
    pub authorization: Option<String>,
    pub test: bool,
}

impl PaymentsResponseData {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
