use std::fmt;

/// How a [`crate::Secret`] renders under `Debug`.
pub trait Strategy<T> {
    /// Write the masked form of `value`
    fn fmt(value: &T, fmt: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Masks the value but names its type, e.g. `*** alloc::string::String ***`. The default.
#[derive(Debug)]
pub enum WithType {}

impl<T> Strategy<T> for WithType {
    fn fmt(_: &T, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "*** {} ***", std::any::type_name::<T>())
    }
}

/// Masks the value and its type. Used for CVNs and API keys.
#[derive(Debug)]
pub enum WithoutType {}

impl<T> Strategy<T> for WithoutType {
    fn fmt(_: &T, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str("*** ***")
    }
}
