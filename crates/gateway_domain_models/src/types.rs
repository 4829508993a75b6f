use crate::{
    router_data::RouterData,
    router_flow_types::{Execute, Purchase},
    router_request_types::{PaymentsPurchaseData, RefundsData},
    router_response_types::PaymentsResponseData,
};

pub type PaymentsPurchaseRouterData = RouterData<Purchase, PaymentsPurchaseData, PaymentsResponseData>;
pub type RefundsRouterData = RouterData<Execute, RefundsData, PaymentsResponseData>;
