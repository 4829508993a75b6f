//! Types interface

use gateway_domain_models::{
    router_flow_types::{Execute, Purchase},
    router_request_types::{PaymentsPurchaseData, RefundsData},
    router_response_types::PaymentsResponseData,
};

use crate::api::ConnectorIntegration;

/// Raw reply of a connector, as handed back by the transport
#[derive(Clone, Debug)]
pub struct Response {
    /// response
    pub response: bytes::Bytes,
    /// status code
    pub status_code: u16,
}

impl Response {
    /// Response with a 200 status, mostly useful when stubbing the transport
    pub fn ok(body: impl Into<bytes::Bytes>) -> Self {
        Self {
            response: body.into(),
            status_code: 200,
        }
    }
}

/// Type alias for `ConnectorIntegration<Purchase, PaymentsPurchaseData, PaymentsResponseData>`
pub type PaymentsPurchaseType =
    dyn ConnectorIntegration<Purchase, PaymentsPurchaseData, PaymentsResponseData>;
/// Type alias for `ConnectorIntegration<Execute, RefundsData, PaymentsResponseData>`
pub type RefundExecuteType = dyn ConnectorIntegration<Execute, RefundsData, PaymentsResponseData>;
