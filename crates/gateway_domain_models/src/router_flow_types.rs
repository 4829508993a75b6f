pub mod payments;
pub mod refunds;

pub use payments::*;
pub use refunds::*;
