//! Payments interface

use gateway_domain_models::{
    router_flow_types::Purchase, router_request_types::PaymentsPurchaseData,
    router_response_types::PaymentsResponseData,
};

use crate::api::{ConnectorCommon, ConnectorIntegration};

/// trait Payment
pub trait Payment: ConnectorCommon + PaymentPurchase {}

/// trait PaymentPurchase
///
/// Single step sale: funds are authorized and captured by one call.
pub trait PaymentPurchase:
    ConnectorIntegration<Purchase, PaymentsPurchaseData, PaymentsResponseData>
{
}
