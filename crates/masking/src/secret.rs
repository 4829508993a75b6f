//! The `Secret` wrapper and the two ways of reading it back.

use std::{fmt, marker::PhantomData, str::FromStr};

use crate::strategy::{Strategy, WithType};

/// Borrow the wrapped value. Prefer this over [`ExposeInterface`] when building payloads.
pub trait PeekInterface<S> {
    /// Wrapped value, by reference
    fn peek(&self) -> &S;
}

/// Unwrap the value for good.
pub trait ExposeInterface<S> {
    /// Wrapped value, by move
    fn expose(self) -> S;
}

/// Card data or a credential whose `Debug` output is decided by `I` instead of the value.
///
/// ```
/// use masking::{Secret, Strategy};
/// use std::fmt;
///
/// enum LastTwo {}
///
/// impl<T: AsRef<str>> Strategy<T> for LastTwo {
///     fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         let val = val.as_ref();
///         let visible = val.get(val.len().saturating_sub(2)..).unwrap_or_default();
///         write!(f, "**{visible}")
///     }
/// }
///
/// let cvn: Secret<String, LastTwo> = Secret::new("123".to_string());
/// assert_eq!("**23", &format!("{:?}", cvn));
/// ```
pub struct Secret<S, I = WithType>
where
    I: Strategy<S>,
{
    pub(crate) inner_secret: S,
    pub(crate) marker: PhantomData<I>,
}

impl<S, I: Strategy<S>> Secret<S, I> {
    /// Wrap `secret`
    pub fn new(secret: S) -> Self {
        Self {
            inner_secret: secret,
            marker: PhantomData,
        }
    }
}

impl<S, I: Strategy<S>> PeekInterface<S> for Secret<S, I> {
    fn peek(&self) -> &S {
        &self.inner_secret
    }
}

impl<S, I: Strategy<S>> ExposeInterface<S> for Secret<S, I> {
    fn expose(self) -> S {
        self.inner_secret
    }
}

impl<S, I: Strategy<S>> From<S> for Secret<S, I> {
    fn from(secret: S) -> Self {
        Self::new(secret)
    }
}

impl<I: Strategy<String>> FromStr for Secret<String, I> {
    type Err = core::convert::Infallible;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(src.to_owned()))
    }
}

impl<S: Clone, I: Strategy<S>> Clone for Secret<S, I> {
    fn clone(&self) -> Self {
        Self::new(self.inner_secret.clone())
    }
}

impl<S: PartialEq, I: Strategy<S>> PartialEq for Secret<S, I> {
    fn eq(&self, other: &Self) -> bool {
        self.inner_secret == other.inner_secret
    }
}

impl<S: Eq, I: Strategy<S>> Eq for Secret<S, I> {}

impl<S, I: Strategy<S>> fmt::Debug for Secret<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        I::fmt(&self.inner_secret, f)
    }
}

impl<S: Default, I: Strategy<S>> Default for Secret<S, I> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
