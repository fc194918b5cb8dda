#![warn(clippy::pedantic)]

pub mod container;
pub mod error;
pub mod header;
pub mod pascal;

pub use container::Hdfm;
pub use error::FormatError;
pub use header::HdfmHeader;
