use std::fmt;
use std::io::{ErrorKind, Read, Write};

use tracing::{debug, trace};

use crate::error::FormatError;
use crate::pascal::{decode_ascii, encode_pascal};

/// Magic signature: ASCII "hdfm".
/// Compared as raw bytes, so byte order never enters into it.
pub const HDFM_MAGIC: [u8; 4] = *b"hdfm";

/// Header length written by every known producer (iTunes 6 and 8).
///
/// Only used when building a fresh header. Parsing always honours the
/// length declared in the file.
pub const DEFAULT_HEADER_LENGTH: u32 = 132;

/// Offset of the opaque reserved range.
pub const RESERVED_OFFSET: usize = 8;

/// Size of the opaque reserved range (four 2-byte fields).
pub const RESERVED_LEN: usize = 8;

/// Offset of the version length byte.
pub const VERSION_LEN_OFFSET: usize = 16;

/// Offset of the first version character.
pub const VERSION_OFFSET: usize = 17;

/// Bytes every header needs before the version characters: magic, header
/// length, reserved range and the version length byte.
const FIXED_FIELDS_LEN: u32 = 17;

/// HDFM header: the fixed-layout prefix of an iTunes library file.
///
/// ```text
/// ┌──────────────┬──────────┬──────────────────────────────────────┐
/// │ Offset       │ Size     │ Description                          │
/// ├──────────────┼──────────┼──────────────────────────────────────┤
/// │ 0x00         │ 4 bytes  │ Magic: "hdfm"                        │
/// │ 0x04         │ 4 bytes  │ Header length (u32, big-endian)      │
/// │ 0x08         │ 8 bytes  │ Reserved (four opaque u16 fields)    │
/// │ 0x10         │ 1 byte   │ Version length n                     │
/// │ 0x11         │ n bytes  │ Version (ASCII)                      │
/// │ 0x11 + n     │ rest     │ Padding up to the header length      │
/// └──────────────┴──────────┴──────────────────────────────────────┘
/// ```
///
/// The reserved range and the padding are kept as raw bytes so that
/// [`write_to`](Self::write_to) reproduces a decoded header exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HdfmHeader {
    /// Declared size of the whole header block, magic included. The file
    /// data starts at this offset.
    pub header_length: u32,

    /// Bytes 8..16, verbatim.
    pub reserved: [u8; RESERVED_LEN],

    /// Version of the application that wrote the file, e.g. `"8.0"`.
    pub version: String,

    /// Bytes between the end of the version string and `header_length`,
    /// verbatim.
    pub padding: Vec<u8>,
}

impl HdfmHeader {
    /// Build a header in the conventional 132-byte layout with zeroed
    /// reserved bytes and zeroed padding.
    ///
    /// # Errors
    ///
    /// - [`FormatError::NonAsciiVersion`] if `version` is not ASCII.
    /// - [`FormatError::VersionTooLong`] if `version` does not fit in a
    ///   132-byte header.
    pub fn new(version: &str) -> Result<Self, FormatError> {
        let limit = (DEFAULT_HEADER_LENGTH - FIXED_FIELDS_LEN) as usize;
        if version.len() > limit {
            return Err(FormatError::VersionTooLong {
                len: version.len(),
                limit,
            });
        }
        let version = decode_ascii(version.as_bytes(), VERSION_OFFSET)?;

        Ok(Self {
            header_length: DEFAULT_HEADER_LENGTH,
            reserved: [0u8; RESERVED_LEN],
            padding: vec![0u8; limit - version.len()],
            version,
        })
    }

    /// Read the header block from the front of `reader`.
    ///
    /// Consumes exactly `header_length` bytes on success, leaving the
    /// reader on the first byte of file data. On a bad magic only the four
    /// magic bytes have been consumed.
    ///
    /// # Errors
    ///
    /// - [`FormatError::BadMagic`] if the first four bytes are not `"hdfm"`.
    /// - [`FormatError::UnexpectedEof`] if the reader ends inside the header.
    /// - [`FormatError::HeaderLengthMismatch`] if the declared length is
    ///   shorter than the 17 bytes of fixed fields.
    /// - [`FormatError::TruncatedVersion`] if the version string would run
    ///   past the declared header length.
    /// - [`FormatError::NonAsciiVersion`] if the version is not ASCII.
    /// - [`FormatError::Io`] for any other reader failure.
    pub fn read_from(reader: &mut impl Read) -> Result<Self, FormatError> {
        Self::read_within(reader, None)
    }

    /// Shared read implementation. When `total_length` is known, a header
    /// that declares itself longer than the whole file is rejected before
    /// any of its variable part is read.
    pub(crate) fn read_within(
        reader: &mut impl Read,
        total_length: Option<u64>,
    ) -> Result<Self, FormatError> {
        // 1. Magic
        let mut magic = [0u8; 4];
        read_field(reader, &mut magic, 0)?;
        if magic != HDFM_MAGIC {
            return Err(FormatError::BadMagic {
                found: u32::from_be_bytes(magic),
            });
        }

        // 2. Header length
        let mut length_buf = [0u8; 4];
        read_field(reader, &mut length_buf, 4)?;
        let header_length = u32::from_be_bytes(length_buf);
        let Some(available) = header_length.checked_sub(FIXED_FIELDS_LEN) else {
            return Err(FormatError::HeaderLengthMismatch {
                declared: header_length,
                required: VERSION_OFFSET,
            });
        };

        if let Some(total) = total_length {
            if u64::from(header_length) > total {
                return Err(FormatError::TruncatedFile {
                    expected: u64::from(header_length),
                    actual: total,
                });
            }
        }

        // 3. Reserved range
        let mut reserved = [0u8; RESERVED_LEN];
        read_field(reader, &mut reserved, RESERVED_OFFSET)?;

        // 4. Version string
        let mut version_len = [0u8; 1];
        read_field(reader, &mut version_len, VERSION_LEN_OFFSET)?;
        let version_len = version_len[0];

        if u32::from(version_len) > available {
            return Err(FormatError::TruncatedVersion {
                offset: VERSION_OFFSET,
                declared: version_len,
                available,
            });
        }

        let mut version_bytes = vec![0u8; usize::from(version_len)];
        read_field(reader, &mut version_bytes, VERSION_OFFSET)?;
        let version = decode_ascii(&version_bytes, VERSION_OFFSET)?;

        // 5. Padding up to the declared length
        let padding_offset = VERSION_OFFSET + version_bytes.len();
        let padding_len = available - u32::from(version_len);
        let mut padding = Vec::new();
        reader
            .by_ref()
            .take(u64::from(padding_len))
            .read_to_end(&mut padding)?;
        if padding.len() < padding_len as usize {
            return Err(FormatError::UnexpectedEof {
                offset: padding_offset + padding.len(),
            });
        }
        trace!(padding_offset, padding_len, "skipped header padding");

        debug!(header_length, version = %version, "decoded hdfm header");

        Ok(Self {
            header_length,
            reserved,
            version,
            padding,
        })
    }

    /// Write the header block exactly as described by this value.
    ///
    /// Nothing is written unless the whole header validates, so a failed
    /// call leaves the writer untouched.
    ///
    /// # Returns
    ///
    /// Number of bytes written, always equal to `header_length`.
    ///
    /// # Errors
    ///
    /// - [`FormatError::HeaderLengthMismatch`] if the fields do not add up
    ///   to `header_length`.
    /// - [`FormatError::NonAsciiVersion`] / [`FormatError::VersionTooLong`]
    ///   if the version cannot be Pascal-encoded.
    /// - [`FormatError::Io`] if the writer fails.
    pub fn write_to(&self, w: &mut impl Write) -> Result<usize, FormatError> {
        let required = self.encoded_len();
        if required != self.header_length as usize {
            return Err(FormatError::HeaderLengthMismatch {
                declared: self.header_length,
                required,
            });
        }

        let mut buf = Vec::with_capacity(required);
        buf.extend_from_slice(&HDFM_MAGIC);
        buf.extend_from_slice(&self.header_length.to_be_bytes());
        buf.extend_from_slice(&self.reserved);
        encode_pascal(&self.version, &mut buf)?;
        buf.extend_from_slice(&self.padding);

        w.write_all(&buf)?;
        Ok(buf.len())
    }

    /// Size the fields of this header occupy when written.
    pub fn encoded_len(&self) -> usize {
        VERSION_OFFSET + self.version.len() + self.padding.len()
    }

    /// The reserved range as four big-endian 16-bit values.
    ///
    /// Purely a view for diagnostics; nothing here assigns them a meaning.
    pub fn reserved_fields(&self) -> [u16; 4] {
        let r = &self.reserved;
        [
            u16::from_be_bytes([r[0], r[1]]),
            u16::from_be_bytes([r[2], r[3]]),
            u16::from_be_bytes([r[4], r[5]]),
            u16::from_be_bytes([r[6], r[7]]),
        ]
    }
}

impl fmt::Display for HdfmHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.reserved_fields();
        write!(
            f,
            "hdfm v{} (header {} bytes, reserved {a:04x} {b:04x} {c:04x} {d:04x}, padding {} bytes)",
            self.version,
            self.header_length,
            self.padding.len()
        )
    }
}

/// Fill `buf` from `reader`, reporting a short read as an EOF at `offset`.
fn read_field(reader: &mut impl Read, buf: &mut [u8], offset: usize) -> Result<(), FormatError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => FormatError::UnexpectedEof { offset },
        _ => FormatError::Io(e),
    })
}
