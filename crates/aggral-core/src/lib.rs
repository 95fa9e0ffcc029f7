mod error;
pub use error::Error;

pub mod dialect;
pub use dialect::Dialect;

pub mod schema;
pub use schema::Schema;

/// A Result type alias that uses this crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
