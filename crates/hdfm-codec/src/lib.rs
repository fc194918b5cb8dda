#![warn(clippy::pedantic)]

pub mod compression;
pub mod error;
pub mod signature;

pub use compression::{deflate, deflate_with_level, inflate, inflate_with_limit};
pub use error::DecompressionError;
pub use signature::{PayloadKind, classify, is_zlib_header};
