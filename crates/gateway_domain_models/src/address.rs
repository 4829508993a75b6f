use masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

/// Billing address supplied by the caller. Every component is optional.
#[derive(Clone, Default, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Address {
    pub line1: Option<Secret<String>>,
    pub line2: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub country: Option<String>,
    pub zip: Option<Secret<String>>,
}

impl Address {
    /// Street, city, state and country joined with `", "` in that order, skipping blank parts.
    /// The postcode is sent on its own.
    pub fn get_combined_address_line(&self) -> Secret<String> {
        let parts = [
            self.line1.as_ref().map(|line| line.peek().as_str()),
            self.line2.as_ref().map(|line| line.peek().as_str()),
            self.city.as_deref(),
            self.state.as_ref().map(|state| state.peek().as_str()),
            self.country.as_deref(),
        ];

        Secret::new(
            parts
                .into_iter()
                .flatten()
                .filter(|part| !part.trim().is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}
