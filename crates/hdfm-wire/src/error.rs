/// Structural violations of the HDFM header layout.
///
/// Every variant is fatal to the current parse. Each one carries the byte
/// offset (from the start of the header) or the expected/actual sizes needed
/// to tell a malformed file from an unsupported one.
///
/// ```text
///   FormatError
///   ├── BadMagic                ← first 4 bytes are not "hdfm"
///   ├── UnexpectedEof           ← stream ended inside the fixed fields
///   ├── HeaderLengthMismatch    ← declared header smaller than its fields
///   ├── TruncatedVersion        ← version string overruns the header block
///   ├── NonAsciiVersion         ← version string is not plain ASCII
///   ├── VersionTooLong          ← version does not fit prefix or header
///   ├── TruncatedFile           ← source shorter than the declared total
///   └── Io(std::io::Error)      ← from the underlying reader/writer
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Magic signature did not match `"hdfm"`.
    #[error("invalid magic: expected \"hdfm\" (0x6864666D), got {found:#010X}")]
    BadMagic { found: u32 },

    /// Input ended before a fixed-position field could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// The declared header length is smaller than the fields that must be
    /// parsed (or written) before the payload.
    #[error("header length mismatch: declared {declared} bytes, fields require {required}")]
    HeaderLengthMismatch { declared: u32, required: usize },

    /// The version length byte claims more bytes than remain in the header
    /// block.
    #[error(
        "truncated version string at offset {offset}: declared {declared} bytes, {available} left in header"
    )]
    TruncatedVersion {
        offset: usize,
        declared: u8,
        available: u32,
    },

    /// A byte of the version string is outside the ASCII range.
    #[error("non-ASCII byte {value:#04X} in version string at offset {offset}")]
    NonAsciiVersion { offset: usize, value: u8 },

    /// A version string longer than its length prefix or the header block
    /// can hold.
    #[error("version string is {len} bytes, limit is {limit}")]
    VersionTooLong { len: usize, limit: usize },

    /// The source ran out before `total_length - header_length` payload
    /// bytes could be read, or the declared total is smaller than the
    /// header block itself.
    #[error("truncated file: expected {expected} bytes, found {actual}")]
    TruncatedFile { expected: u64, actual: u64 },

    /// I/O error during read or write.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
