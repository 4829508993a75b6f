#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

//!
//! Environment of the payment gateway crates: logger, log configuration, its environment awareness.
//!

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod config;
pub mod env;
pub mod logger;

pub use tracing;
pub use tracing::instrument;

#[doc(inline)]
pub use self::env::*;
