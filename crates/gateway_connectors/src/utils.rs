use common_utils::types::{AmountConvertor, MinorUnit, ToMinorUnit};
use error_stack::ResultExt;
use gateway_domain_models::{
    address::Address, payment_method_data::Card, router_request_types::PaymentsPurchaseData,
};
use gateway_interfaces::errors;
use masking::{PeekInterface, Secret};

type Error = error_stack::Report<errors::ConnectorError>;

pub(crate) fn missing_field_err(
    message: &'static str,
) -> Box<dyn Fn() -> error_stack::Report<errors::ConnectorError> + 'static> {
    Box::new(move || {
        errors::ConnectorError::MissingRequiredField {
            field_name: message,
        }
        .into()
    })
}

/// Caller supplied amount as minor units. Textual, fractional or negative amounts are rejected.
pub(crate) fn to_minor_unit(amount: impl ToMinorUnit) -> Result<MinorUnit, Error> {
    amount
        .to_minor_unit()
        .change_context(errors::ConnectorError::InvalidDataFormat {
            field_name: "amount",
        })
}

pub(crate) fn convert_amount<T>(
    amount_convertor: &dyn AmountConvertor<Output = T>,
    amount: MinorUnit,
) -> Result<T, Error> {
    amount_convertor
        .convert(amount)
        .change_context(errors::ConnectorError::InvalidDataFormat {
            field_name: "amount",
        })
}

pub trait CardData {
    fn get_expiry_month_2_digit(&self) -> Secret<String>;
    fn get_card_expiry_year_2_digit(&self) -> Secret<String>;
    /// Verification number, or an empty value when the card has none
    fn get_cvc_or_empty(&self) -> Secret<String>;
}

impl CardData for Card {
    fn get_expiry_month_2_digit(&self) -> Secret<String> {
        self.card_exp_month.two_digits()
    }

    fn get_card_expiry_year_2_digit(&self) -> Secret<String> {
        self.card_exp_year.two_digits()
    }

    fn get_cvc_or_empty(&self) -> Secret<String> {
        self.card_cvc
            .as_ref()
            .map(|cvc| Secret::new(cvc.peek().peek().clone()))
            .unwrap_or_default()
    }
}

pub trait PaymentsPurchaseRequestData {
    fn get_billing_address(&self) -> Result<&Address, Error>;
    fn get_email_or_empty(&self) -> Secret<String>;
}

impl PaymentsPurchaseRequestData for PaymentsPurchaseData {
    fn get_billing_address(&self) -> Result<&Address, Error> {
        self.billing_address
            .as_ref()
            .ok_or_else(missing_field_err("billing_address"))
    }

    fn get_email_or_empty(&self) -> Secret<String> {
        self.email
            .as_ref()
            .map(|email| Secret::new(email.peek().clone()))
            .unwrap_or_default()
    }
}
