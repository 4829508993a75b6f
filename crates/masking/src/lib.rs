#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg_hide))]
#![cfg_attr(docsrs, doc(cfg_hide(doc)))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//!
//! Personal Identifiable Information protection. Wrapper types and traits for secret management
//! which help ensure card data and credentials aren't accidentally logged or otherwise exposed.
//!

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

mod strategy;
pub use strategy::{Strategy, WithType, WithoutType};

mod secret;
pub use secret::{ExposeInterface, PeekInterface, Secret};

#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "serde")]
pub use crate::serde::{Deserialize, SerializableSecret, Serialize};

pub mod maskable;

pub use maskable::*;
