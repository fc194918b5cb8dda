/// Errors from inflating a buffer that carries a zlib signature.
///
/// These are never raised for plain (unsigned) buffers: those pass through
/// untouched. Once the signature matches, any failure to produce the full
/// stream is an error; partial output is never returned.
///
/// ```text
///   DecompressionError
///   ├── Corrupt     ← codec rejected the stream (bad block, checksum, dictionary)
///   ├── Truncated   ← input ran out before the end-of-stream marker
///   └── SizeLimit   ← output would exceed the caller's limit
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecompressionError {
    /// The DEFLATE stream is invalid: a malformed block, an Adler-32
    /// checksum mismatch, or a preset dictionary that cannot be supplied.
    #[error("zlib stream corrupt after {consumed} input bytes")]
    Corrupt {
        consumed: u64,
        #[source]
        source: flate2::DecompressError,
    },

    /// The input ended before the stream was complete.
    #[error("zlib stream truncated: consumed all {consumed} input bytes, produced {produced}")]
    Truncated { consumed: u64, produced: u64 },

    /// Inflated output grew past the configured maximum.
    #[error("inflated size exceeds limit {limit}")]
    SizeLimit { limit: usize },
}
