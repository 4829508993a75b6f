use cards::{CardExpirationMonth, CardExpirationYear, CardNumber, CardSecurityCode};
use masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Card {
    pub card_number: CardNumber,
    pub card_exp_month: CardExpirationMonth,
    pub card_exp_year: CardExpirationYear,
    /// Card verification number. Cards without one go to the non-CVN endpoints.
    pub card_cvc: Option<CardSecurityCode>,
    pub card_holder_first_name: Option<Secret<String>>,
    pub card_holder_last_name: Option<Secret<String>>,
}

impl Card {
    /// First and last name separated by a single space, skipping blank names.
    pub fn get_card_holder_name(&self) -> Secret<String> {
        let name = [&self.card_holder_first_name, &self.card_holder_last_name]
            .into_iter()
            .flatten()
            .map(|name| name.peek().trim())
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Secret::new(name)
    }
}
