use common_utils::{ext_traits::XmlExt, types::StringMinorUnit};
use error_stack::{report, ResultExt};
use gateway_domain_models::{
    address::Address,
    router_data::{ConnectorAuthType, RouterData},
    router_response_types::PaymentsResponseData,
    types::{PaymentsPurchaseRouterData, RefundsRouterData},
};
use gateway_env::logger;
use gateway_interfaces::errors;
use indexmap::IndexMap;
use masking::Secret;
use serde::Serialize;

use crate::{
    types::ResponseRouterData,
    utils::{CardData, PaymentsPurchaseRequestData},
};

pub struct EwayRouterData<T> {
    pub amount: StringMinorUnit,
    pub router_data: T,
}

impl<T> From<(StringMinorUnit, T)> for EwayRouterData<T> {
    fn from((amount, item): (StringMinorUnit, T)) -> Self {
        Self {
            amount,
            router_data: item,
        }
    }
}

pub mod eway_constants {
    pub const RESPONSE_ROOT: &str = "ewayResponse";

    pub const LIVE_CVN_PURCHASE: &str = "gateway_cvn/xmlpayment.asp";
    pub const LIVE_PURCHASE: &str = "gateway/xmlpayment.asp";
    pub const TEST_CVN_PURCHASE: &str = "gateway_cvn/xmltest/testpage.asp";
    pub const TEST_PURCHASE: &str = "gateway/xmltest/testpage.asp";
    pub const LIVE_REFUND: &str = "gateway/xmlpaymentrefund.asp";
    pub const TEST_REFUND: &str = "gateway/xmltest/refund_test.asp";
}

pub struct EwayAuthType {
    /// eWAY customer id, the merchant login
    pub(super) customer_id: Secret<String>,
    pub(super) refund_password: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for EwayAuthType {
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::HeaderKey { api_key } => Ok(Self {
                customer_id: api_key.to_owned(),
                refund_password: Secret::default(),
            }),
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                customer_id: api_key.to_owned(),
                refund_password: key1.to_owned(),
            }),
            ConnectorAuthType::NoKey => Err(errors::ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

/// Billing address as eWAY takes it: one free-text line plus the postcode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EwayAddress {
    pub address: Secret<String>,
    pub postcode: Secret<String>,
}

impl From<&Address> for EwayAddress {
    fn from(address: &Address) -> Self {
        Self {
            address: address.get_combined_address_line(),
            postcode: address.zip.clone().unwrap_or_default(),
        }
    }
}

// Element order is part of the wire format.
#[derive(Debug, Serialize)]
#[serde(rename = "ewaygateway")]
pub struct EwayPaymentsRequest {
    #[serde(rename = "ewayCardNumber")]
    card_number: Secret<String>,
    #[serde(rename = "ewayCardExpiryMonth")]
    card_expiry_month: Secret<String>,
    #[serde(rename = "ewayCardExpiryYear")]
    card_expiry_year: Secret<String>,
    #[serde(rename = "ewayCustomerFirstName")]
    customer_first_name: Secret<String>,
    #[serde(rename = "ewayCustomerLastName")]
    customer_last_name: Secret<String>,
    #[serde(rename = "ewayCardHoldersName")]
    card_holders_name: Secret<String>,
    #[serde(rename = "ewayCVN")]
    cvn: Secret<String>,
    #[serde(rename = "ewayCustomerAddress")]
    customer_address: Secret<String>,
    #[serde(rename = "ewayCustomerPostcode")]
    customer_postcode: Secret<String>,
    #[serde(rename = "ewayCustomerEmail")]
    customer_email: Secret<String>,
    #[serde(rename = "ewayCustomerInvoiceRef")]
    customer_invoice_ref: String,
    #[serde(rename = "ewayCustomerInvoiceDescription")]
    customer_invoice_description: String,
    #[serde(rename = "ewayTrxnNumber")]
    trxn_number: String,
    #[serde(rename = "ewayOption1")]
    option1: String,
    #[serde(rename = "ewayOption2")]
    option2: String,
    #[serde(rename = "ewayOption3")]
    option3: String,
    #[serde(rename = "ewayTotalAmount")]
    total_amount: StringMinorUnit,
    #[serde(rename = "ewayCustomerID")]
    customer_id: Secret<String>,
}

impl TryFrom<&EwayRouterData<&PaymentsPurchaseRouterData>> for EwayPaymentsRequest {
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: &EwayRouterData<&PaymentsPurchaseRouterData>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let address = EwayAddress::from(request.get_billing_address()?);
        let auth = EwayAuthType::try_from(&item.router_data.connector_auth_type)?;
        let card = &request.card;
        if !card.card_number.is_luhn_valid() {
            logger::warn!("card number fails the Luhn check; sending it for the gateway to decide");
        }

        Ok(Self {
            card_number: card.card_number.get_card_no(),
            card_expiry_month: card.get_expiry_month_2_digit(),
            card_expiry_year: card.get_card_expiry_year_2_digit(),
            customer_first_name: card.card_holder_first_name.clone().unwrap_or_default(),
            customer_last_name: card.card_holder_last_name.clone().unwrap_or_default(),
            card_holders_name: card.get_card_holder_name(),
            cvn: card.get_cvc_or_empty(),
            customer_address: address.address,
            customer_postcode: address.postcode,
            customer_email: request.get_email_or_empty(),
            customer_invoice_ref: request.order_id.clone().unwrap_or_default(),
            customer_invoice_description: request.description.clone().unwrap_or_default(),
            // Transaction number and option slots are required but always sent empty
            trxn_number: String::new(),
            option1: String::new(),
            option2: String::new(),
            option3: String::new(),
            total_amount: item.amount.clone(),
            customer_id: auth.customer_id,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename = "ewaygateway")]
pub struct EwayRefundRequest {
    #[serde(rename = "ewayCustomerID")]
    customer_id: Secret<String>,
    #[serde(rename = "ewayTotalAmount")]
    total_amount: StringMinorUnit,
    #[serde(rename = "ewayOption1")]
    option1: String,
    #[serde(rename = "ewayOption2")]
    option2: String,
    #[serde(rename = "ewayOption3")]
    option3: String,
    #[serde(rename = "ewayTrxnNumber")]
    trxn_number: String,
    #[serde(rename = "ewayOriginalTrxnNumber")]
    original_trxn_number: String,
    #[serde(rename = "ewayRefundPassword")]
    refund_password: Secret<String>,
    #[serde(rename = "ewayCardExpiryMonth")]
    card_expiry_month: String,
    #[serde(rename = "ewayCardExpiryYear")]
    card_expiry_year: String,
}

impl TryFrom<&EwayRouterData<&RefundsRouterData>> for EwayRefundRequest {
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(item: &EwayRouterData<&RefundsRouterData>) -> Result<Self, Self::Error> {
        let auth = EwayAuthType::try_from(&item.router_data.connector_auth_type)?;
        let original_trxn_number = item.router_data.request.connector_transaction_id.clone();
        if original_trxn_number.trim().is_empty() {
            return Err(errors::ConnectorError::MissingRequiredField {
                field_name: "authorization",
            }
            .into());
        }

        Ok(Self {
            customer_id: auth.customer_id,
            total_amount: item.amount.clone(),
            option1: String::new(),
            option2: String::new(),
            option3: String::new(),
            trxn_number: String::new(),
            original_trxn_number,
            refund_password: auth.refund_password,
            card_expiry_month: String::new(),
            card_expiry_year: String::new(),
        })
    }
}

/// Reply of the XML API, one entry per leaf element keyed by its lower-cased tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EwayPaymentsResponse {
    pub params: IndexMap<String, String>,
}

impl EwayPaymentsResponse {
    pub fn parse(body: &[u8]) -> Result<Self, error_stack::Report<errors::ConnectorError>> {
        let document = body
            .parse_xml_leaves()
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        if document.root != eway_constants::RESPONSE_ROOT {
            return Err(
                report!(errors::ConnectorError::ResponseDeserializationFailed)
                    .attach_printable(format!("unexpected root element <{}>", document.root)),
            );
        }

        Ok(Self {
            params: document
                .leaves
                .into_iter()
                .map(|(name, value)| (name.to_lowercase(), value))
                .collect(),
        })
    }

    fn param(&self, key: &str) -> &str {
        self.params.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn is_success(&self) -> bool {
        self.param("ewaytrxnstatus").eq_ignore_ascii_case("true")
    }

    pub fn transaction_number(&self) -> Option<String> {
        Some(self.param("ewaytrxnnumber"))
            .filter(|number| !number.is_empty())
            .map(str::to_string)
    }

    /// Canonical text of the leading response code, falling back to the raw gateway text
    pub fn message(&self) -> String {
        let raw = self.param("ewaytrxnerror");
        raw.get(..2)
            .and_then(response_code_message)
            .unwrap_or(raw)
            .to_string()
    }
}

impl<F, Req> TryFrom<ResponseRouterData<F, EwayPaymentsResponse, Req, PaymentsResponseData>>
    for RouterData<F, Req, PaymentsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;
    fn try_from(
        item: ResponseRouterData<F, EwayPaymentsResponse, Req, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        let response = PaymentsResponseData {
            success: item.response.is_success(),
            message: item.response.message(),
            authorization: item.response.transaction_number(),
            test: item.data.is_test_mode(),
            params: item.response.params,
        };
        Ok(Self {
            response: Some(response),
            connector_http_status_code: Some(item.http_code),
            ..item.data
        })
    }
}

fn response_code_message(code: &str) -> Option<&'static str> {
    let message = match code {
        "00" => "Transaction Approved",
        "01" => "Refer to Issuer",
        "02" => "Refer to Issuer, special",
        "03" => "No Merchant",
        "04" => "Pick Up Card",
        "05" => "Do Not Honour",
        "06" => "Error",
        "07" => "Pick Up Card, Special",
        "08" => "Honour With Identification",
        "09" => "Request In Progress",
        "10" => "Approved For Partial Amount",
        "11" => "Approved, VIP",
        "12" => "Invalid Transaction",
        "13" => "Invalid Amount",
        "14" => "Invalid Card Number",
        "15" => "No Issuer",
        "16" => "Approved, Update Track 3",
        "19" => "Re-enter Last Transaction",
        "21" => "No Action Taken",
        "22" => "Suspected Malfunction",
        "23" => "Unacceptable Transaction Fee",
        "25" => "Unable to Locate Record On File",
        "30" => "Format Error",
        "31" => "Bank Not Supported By Switch",
        "33" => "Expired Card, Capture",
        "34" => "Suspected Fraud, Retain Card",
        "35" => "Card Acceptor, Contact Acquirer, Retain Card",
        "36" => "Restricted Card, Retain Card",
        "37" => "Contact Acquirer Security Department, Retain Card",
        "38" => "PIN Tries Exceeded, Capture",
        "39" => "No Credit Account",
        "40" => "Function Not Supported",
        "41" => "Lost Card",
        "42" => "No Universal Account",
        "43" => "Stolen Card",
        "44" => "No Investment Account",
        "51" => "Insufficient Funds",
        "52" => "No Cheque Account",
        "53" => "No Savings Account",
        "54" => "Expired Card",
        "55" => "Incorrect PIN",
        "56" => "No Card Record",
        "57" => "Function Not Permitted to Cardholder",
        "58" => "Function Not Permitted to Terminal",
        "59" => "Suspected Fraud",
        "60" => "Acceptor Contact Acquirer",
        "61" => "Exceeds Withdrawal Limit",
        "62" => "Restricted Card",
        "63" => "Security Violation",
        "64" => "Original Amount Incorrect",
        "66" => "Acceptor Contact Acquirer, Security",
        "67" => "Capture Card",
        "75" => "PIN Tries Exceeded",
        "82" => "CVV Validation Error",
        "90" => "Cutoff In Progress",
        "91" => "Card Issuer Unavailable",
        "92" => "Unable To Route Transaction",
        "93" => "Cannot Complete, Violation Of The Law",
        "94" => "Duplicate Transaction",
        "96" => "System Error",
        _ => return None,
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::str::FromStr;

    use cards::{CardExpirationMonth, CardExpirationYear, CardNumber, CardSecurityCode};
    use common_utils::{
        ext_traits::Encode,
        pii::Email,
        types::{AmountConvertor, MinorUnit, StringMinorUnitForConnector},
    };
    use gateway_domain_models::{
        payment_method_data::Card, router_request_types::PaymentsPurchaseData,
    };
    use masking::{ExposeInterface, PeekInterface};

    use super::*;

    fn billing_address() -> Address {
        Address {
            line1: Some(Secret::new("1234 First St.".to_string())),
            line2: Some(Secret::new("Apt. 1".to_string())),
            city: Some("Melbourne".to_string()),
            state: Some(Secret::new("ACT".to_string())),
            country: Some("AU".to_string()),
            zip: Some(Secret::new("12345".to_string())),
        }
    }

    fn purchase_router_data() -> PaymentsPurchaseRouterData {
        let card = Card {
            card_number: CardNumber::from_str("4444333322221111").unwrap(),
            card_exp_month: CardExpirationMonth::try_from(9).unwrap(),
            card_exp_year: CardExpirationYear::try_from(2013).unwrap(),
            card_cvc: Some(CardSecurityCode::try_from("123").unwrap()),
            card_holder_first_name: Some(Secret::new("Longbob".to_string())),
            card_holder_last_name: Some(Secret::new("Longsen".to_string())),
        };
        RouterData::new(
            "eway",
            ConnectorAuthType::HeaderKey {
                api_key: Secret::new("87654321".to_string()),
            },
            true,
            PaymentsPurchaseData {
                amount: MinorUnit::new(100),
                card,
                order_id: Some("1230123".to_string()),
                email: Some(Email::from_str("bob@testbob.com").unwrap()),
                billing_address: Some(billing_address()),
                description: Some("purchased items".to_string()),
            },
        )
    }

    fn amount(value: i64) -> StringMinorUnit {
        StringMinorUnitForConnector
            .convert(MinorUnit::new(value))
            .unwrap()
    }

    #[test]
    fn address_is_joined_and_postcode_kept_apart() {
        let address = EwayAddress::from(&billing_address());

        assert_eq!(
            address.address.expose(),
            "1234 First St., Apt. 1, Melbourne, ACT, AU"
        );
        assert_eq!(address.postcode.expose(), "12345");
    }

    #[test]
    fn purchase_request_keeps_wire_order() {
        let router_data = purchase_router_data();
        let request =
            EwayPaymentsRequest::try_from(&EwayRouterData::from((amount(100), &router_data)))
                .unwrap();
        let xml = request.encode_to_string_of_xml().unwrap();

        assert!(xml.starts_with("<ewaygateway><ewayCardNumber>4444333322221111</ewayCardNumber>"));
        assert!(xml.contains("<ewayCardExpiryMonth>09</ewayCardExpiryMonth>"));
        assert!(xml.contains("<ewayCardExpiryYear>13</ewayCardExpiryYear>"));
        assert!(xml.contains("<ewayCardHoldersName>Longbob Longsen</ewayCardHoldersName>"));
        assert!(xml.contains("<ewayCVN>123</ewayCVN>"));
        assert!(xml.contains(
            "<ewayCustomerAddress>1234 First St., Apt. 1, Melbourne, ACT, AU</ewayCustomerAddress>"
        ));
        assert!(xml.contains("<ewayCustomerEmail>bob@testbob.com</ewayCustomerEmail>"));
        assert!(xml.ends_with(
            "<ewayTotalAmount>100</ewayTotalAmount><ewayCustomerID>87654321</ewayCustomerID></ewaygateway>"
        ));

        let order = [
            "ewayCardNumber",
            "ewayCardExpiryMonth",
            "ewayCardExpiryYear",
            "ewayCustomerFirstName",
            "ewayCustomerLastName",
            "ewayCardHoldersName",
            "ewayCVN",
            "ewayCustomerAddress",
            "ewayCustomerPostcode",
            "ewayCustomerEmail",
            "ewayCustomerInvoiceRef",
            "ewayCustomerInvoiceDescription",
            "ewayTrxnNumber",
            "ewayOption1",
            "ewayOption2",
            "ewayOption3",
            "ewayTotalAmount",
            "ewayCustomerID",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|name| xml.find(&format!("<{name}")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn purchase_request_debug_output_is_masked() {
        let router_data = purchase_router_data();
        let request =
            EwayPaymentsRequest::try_from(&EwayRouterData::from((amount(100), &router_data)))
                .unwrap();
        let debug = format!("{request:?}");

        assert!(!debug.contains("4444333322221111"));
        assert!(!debug.contains("87654321"));
    }

    #[test]
    fn purchase_without_billing_address_is_a_caller_error() {
        let mut router_data = purchase_router_data();
        router_data.request.billing_address = None;

        let error =
            EwayPaymentsRequest::try_from(&EwayRouterData::from((amount(100), &router_data)))
                .err()
                .unwrap();
        assert_eq!(
            error.current_context(),
            &errors::ConnectorError::MissingRequiredField {
                field_name: "billing_address"
            }
        );
    }

    #[test]
    fn auth_without_key_is_rejected() {
        assert!(EwayAuthType::try_from(&ConnectorAuthType::NoKey).is_err());
        let auth = EwayAuthType::try_from(&ConnectorAuthType::BodyKey {
            api_key: Secret::new("87654321".to_string()),
            key1: Secret::new("refund-pass".to_string()),
        })
        .unwrap();
        assert_eq!(auth.customer_id.peek(), "87654321");
        assert_eq!(auth.refund_password.peek(), "refund-pass");
    }

    #[test]
    fn response_fields_are_lower_cased() {
        let response = EwayPaymentsResponse::parse(
            b"<ewayResponse><ewayTrxnStatus>TRUE</ewayTrxnStatus><ewayTrxnNumber>9953564</ewayTrxnNumber><ewayAuthCode/><ewayReturnAmount>40</ewayReturnAmount><ewayTrxnError>00,Transaction Approved (Sandbox)</ewayTrxnError></ewayResponse>",
        )
        .unwrap();

        assert!(response.is_success());
        assert_eq!(response.transaction_number().as_deref(), Some("9953564"));
        assert_eq!(response.params["ewayreturnamount"], "40");
        assert_eq!(response.params["ewayauthcode"], "");
        assert_eq!(response.message(), "Transaction Approved");
    }

    #[test]
    fn unknown_codes_keep_the_gateway_text() {
        let response = EwayPaymentsResponse {
            params: IndexMap::from([(
                "ewaytrxnerror".to_string(),
                "eWAY Error: Invalid Expiry Date.".to_string(),
            )]),
        };
        assert_eq!(response.message(), "eWAY Error: Invalid Expiry Date.");
        assert!(!response.is_success());
        assert_eq!(response.transaction_number(), None);

        let declined = EwayPaymentsResponse {
            params: IndexMap::from([("ewaytrxnerror".to_string(), "05,Do Not Honour".to_string())]),
        };
        assert_eq!(declined.message(), "Do Not Honour");
        assert_eq!(
            EwayPaymentsResponse {
                params: IndexMap::new()
            }
            .message(),
            ""
        );
    }

    #[test]
    fn foreign_documents_are_not_replies() {
        let error = EwayPaymentsResponse::parse(b"<html><body>Service Unavailable</body></html>")
            .unwrap_err();
        assert_eq!(
            error.current_context(),
            &errors::ConnectorError::ResponseDeserializationFailed
        );
        assert!(EwayPaymentsResponse::parse(b"Service Unavailable").is_err());
    }
}
