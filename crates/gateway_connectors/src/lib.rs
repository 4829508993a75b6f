pub mod connectors;
pub mod constants;
pub mod types;
pub mod utils;

pub use connectors::eway::{Eway, EwayGateway};
