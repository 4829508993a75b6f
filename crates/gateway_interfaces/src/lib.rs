//! Interface definitions shared by the gateway connectors
#![warn(missing_docs, missing_debug_implementations)]

pub mod api;
pub mod configs;
pub mod errors;
pub mod types;
