//! Refunds interface

use gateway_domain_models::{
    router_flow_types::Execute, router_request_types::RefundsData,
    router_response_types::PaymentsResponseData,
};

use crate::api::{ConnectorCommon, ConnectorIntegration};

/// trait RefundExecute
pub trait RefundExecute:
    ConnectorIntegration<Execute, RefundsData, PaymentsResponseData>
{
}

/// trait Refund
pub trait Refund: ConnectorCommon + RefundExecute {}
