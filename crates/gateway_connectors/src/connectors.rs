pub mod eway;

pub use self::eway::Eway;
