//!
//! Logger of the system.
//!

pub use tracing::{debug, error, info, warn, Level};

mod setup;

pub use setup::{setup, TelemetryGuard};
