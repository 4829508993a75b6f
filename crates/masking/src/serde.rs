//!
//! Serde-related.
//!

pub use serde::{de, Deserialize, Serialize, Serializer};

use crate::{PeekInterface, Secret, Strategy};

/// Marker trait for secret types which can be [`Serialize`]-d by [`serde`].
///
/// Only `Secret<T>` whose `T` carries this marker receives a [`Serialize`] impl, so wiring a new
/// secret type into an outgoing payload is always an explicit decision.
pub trait SerializableSecret: Serialize {}

impl SerializableSecret for String {}
impl SerializableSecret for u8 {}
impl SerializableSecret for u16 {}

impl<'de, T, I> Deserialize<'de> for Secret<T, I>
where
    T: Clone + de::DeserializeOwned + Sized,
    I: Strategy<T>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::new)
    }
}

impl<T, I> Serialize for Secret<T, I>
where
    T: SerializableSecret + Serialize + Sized,
    I: Strategy<T>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.peek().serialize(serializer)
    }
}
