use common_utils::{pii, types::MinorUnit};
use serde::{Deserialize, Serialize};

use crate::{address::Address, payment_method_data::Card};

/// Caller supplied details of a purchase besides the amount and the card.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PurchaseOptions {
    pub order_id: Option<String>,
    pub email: Option<pii::Email>,
    /// Required. A purchase without a billing address is rejected before anything is sent.
    pub billing_address: Option<Address>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PaymentsPurchaseData {
    pub amount: MinorUnit,
    pub card: Card,
    pub order_id: Option<String>,
    pub email: Option<pii::Email>,
    pub billing_address: Option<Address>,
    pub description: Option<String>,
}

impl PaymentsPurchaseData {
    pub fn new(amount: MinorUnit, card: Card, options: PurchaseOptions) -> Self {
        let PurchaseOptions {
            order_id,
            email,
            billing_address,
            description,
        } = options;
        Self {
            amount,
            card,
            order_id,
            email,
            billing_address,
            description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RefundsData {
    pub refund_amount: MinorUnit,
    /// Transaction number returned by the purchase being refunded
    pub connector_transaction_id: String,
}
