use std::io::{Read, Write};

use tracing::debug;

use crate::error::FormatError;
use crate::header::HdfmHeader;

/// Upper bound on the buffer reserved up front for file data. Larger
/// payloads grow the buffer as bytes actually arrive, so a bogus total
/// length cannot force a huge allocation before anything is read.
const MAX_INITIAL_CAPACITY: u64 = 64 * 1024 * 1024;

/// A decoded HDFM file: the header plus the bytes that follow it.
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ Hdfm                                             │
/// │   header:    HdfmHeader ← version, raw fields    │
/// │   file_data: Vec<u8>    ← header_length..total   │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// `file_data` is returned exactly as stored. Whether it is zlib-compressed
/// is for the caller to find out (see the `hdfm-codec` crate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hdfm {
    pub header: HdfmHeader,
    pub file_data: Vec<u8>,
}

impl Hdfm {
    /// Decode a whole HDFM file from `reader`.
    ///
    /// `total_length` is the exact size of the underlying data, header and
    /// payload combined, as known to the caller (typically the file size).
    /// It is never inferred from the stream, and no byte past it is read.
    ///
    /// On success `file_data.len() == total_length - header.header_length`
    /// and the reader sits `total_length` bytes past where it started.
    ///
    /// # Errors
    ///
    /// Every header error from [`HdfmHeader::read_from`], plus:
    /// - [`FormatError::TruncatedFile`] if the declared header is longer
    ///   than `total_length`, or the reader runs out before
    ///   `total_length` bytes.
    pub fn read<R: Read>(reader: &mut R, total_length: u64) -> Result<Self, FormatError> {
        let mut bounded = reader.by_ref().take(total_length);
        let header = HdfmHeader::read_within(&mut bounded, Some(total_length))?;

        let expected = total_length - u64::from(header.header_length);
        let mut file_data = Vec::with_capacity(expected.min(MAX_INITIAL_CAPACITY) as usize);
        bounded.read_to_end(&mut file_data)?;

        let actual = file_data.len() as u64;
        if actual < expected {
            return Err(FormatError::TruncatedFile { expected, actual });
        }

        debug!(
            version = %header.version,
            header_length = header.header_length,
            file_data = actual,
            "read hdfm file"
        );

        Ok(Self { header, file_data })
    }

    /// Decode an HDFM file held entirely in memory. The slice length is the
    /// total length.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn from_bytes(buf: &[u8]) -> Result<Self, FormatError> {
        let mut reader = buf;
        Self::read(&mut reader, buf.len() as u64)
    }

    /// Write the header followed by the file data.
    ///
    /// # Returns
    ///
    /// Total number of bytes written.
    ///
    /// # Errors
    ///
    /// Every error from [`HdfmHeader::write_to`]. Nothing is written if
    /// the header does not validate.
    pub fn write_to(&self, w: &mut impl Write) -> Result<usize, FormatError> {
        let header_bytes = self.header.write_to(w)?;
        w.write_all(&self.file_data)?;
        Ok(header_bytes + self.file_data.len())
    }

    /// Size of the file this value was decoded from (or will write).
    pub fn total_length(&self) -> u64 {
        u64::from(self.header.header_length) + self.file_data.len() as u64
    }
}
