use std::io::Write;

use crate::error::FormatError;

/// Longest string a one-byte length prefix can describe.
pub const MAX_PASCAL_LEN: usize = u8::MAX as usize;

/// Write `text` as a Pascal-style string: one length byte, then the bytes.
///
/// Only ASCII text is accepted, so the byte length equals the character
/// count that a reader will recover.
///
/// # Returns
///
/// The number of bytes written (`1 + text.len()`).
///
/// # Errors
///
/// - [`FormatError::NonAsciiVersion`] if `text` contains a non-ASCII byte.
///   The offset is relative to the first character.
/// - [`FormatError::VersionTooLong`] if `text` exceeds 255 bytes.
/// - [`FormatError::Io`] if the writer fails.
pub fn encode_pascal(text: &str, w: &mut impl Write) -> Result<usize, FormatError> {
    validate_ascii(text.as_bytes(), 0)?;
    let len = u8::try_from(text.len()).map_err(|_| FormatError::VersionTooLong {
        len: text.len(),
        limit: MAX_PASCAL_LEN,
    })?;

    w.write_all(&[len])?;
    w.write_all(text.as_bytes())?;
    Ok(1 + text.len())
}

/// Decode the character bytes of a Pascal-style string as ASCII.
///
/// `bytes` holds exactly the characters (the length byte has already been
/// consumed). `offset` is the position of `bytes[0]` in the enclosing
/// buffer and is only used for error reporting.
///
/// # Errors
///
/// [`FormatError::NonAsciiVersion`] at the first byte above `0x7F`.
pub fn decode_ascii(bytes: &[u8], offset: usize) -> Result<String, FormatError> {
    validate_ascii(bytes, offset)?;
    // All bytes are < 0x80, so this is a 1:1 byte-to-char mapping.
    Ok(bytes.iter().map(|&b| char::from(b)).collect())
}

fn validate_ascii(bytes: &[u8], offset: usize) -> Result<(), FormatError> {
    match bytes.iter().position(|b| !b.is_ascii()) {
        Some(i) => Err(FormatError::NonAsciiVersion {
            offset: offset + i,
            value: bytes[i],
        }),
        None => Ok(()),
    }
}
