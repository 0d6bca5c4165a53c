#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// #![warn(clippy::cargo)]

pub mod analysis;
pub mod config;
pub mod envelope;
pub mod error;
pub mod math;
pub mod schema;
pub mod source;
pub mod statistics;
pub mod store;

pub use error::Error;

pub type Result<T> = ::std::result::Result<T, Error>;
