#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;

pub use config::{DecoderConfig, InflateMode};
pub use decoder::{DecodedLibrary, HdfmDecoder};
pub use error::DecodeError;
