use std::borrow::Cow;
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use tracing::{debug, trace, warn};

use crate::error::DecompressionError;
use crate::signature::{PayloadKind, classify};

/// Default zlib compression level (0–9 scale).
///
/// Level 6 is what `DeflaterOutputStream` and zlib itself default to, and
/// it produces the `78 9C` header found in existing library files.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Smallest step by which the output buffer grows.
const MIN_GROWTH: usize = 32 * 1024;

/// First guess at the inflated size, as a multiple of the input size.
const INITIAL_RATIO: usize = 4;

/// Inflate `data` if it carries a zlib signature, otherwise hand it back.
///
/// Plain buffers come back as `Cow::Borrowed(data)`: same bytes, same
/// allocation, no copy. Buffers that start with a valid zlib header are
/// inflated in full into a fresh buffer that grows until the stream ends.
///
/// # Example
///
/// ```rust
/// use hdfm_codec::compression::{deflate, inflate};
///
/// let plain = b"Uncompressed.";
/// assert_eq!(inflate(plain).unwrap().as_ref(), plain);
///
/// let packed = deflate(plain).unwrap();
/// assert_eq!(inflate(&packed).unwrap().as_ref(), plain);
/// ```
///
/// # Errors
///
/// - [`DecompressionError::Corrupt`] if the codec rejects the stream.
/// - [`DecompressionError::Truncated`] if the stream is incomplete.
pub fn inflate(data: &[u8]) -> Result<Cow<'_, [u8]>, DecompressionError> {
    inflate_with_limit(data, None)
}

/// Same as [`inflate`], but refuses to produce more than `limit` bytes.
///
/// `None` means no limit. The limit only applies to buffers that are
/// actually inflated; plain buffers are returned whatever their size.
///
/// # Errors
///
/// Every error from [`inflate`], plus [`DecompressionError::SizeLimit`]
/// once the output would exceed `limit`.
pub fn inflate_with_limit(
    data: &[u8],
    limit: Option<usize>,
) -> Result<Cow<'_, [u8]>, DecompressionError> {
    if classify(data) == PayloadKind::Plain {
        trace!(len = data.len(), "no zlib header, passing payload through");
        return Ok(Cow::Borrowed(data));
    }

    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(initial_capacity(data.len(), limit));

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity().max(MIN_GROWTH));
        }

        let in_before = inflater.total_in();
        let out_before = inflater.total_out();
        let input = &data[in_before as usize..];

        let status = inflater
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|source| DecompressionError::Corrupt {
                consumed: inflater.total_in(),
                source,
            })?;

        if let Some(limit) = limit {
            if out.len() > limit {
                return Err(DecompressionError::SizeLimit { limit });
            }
        }

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let progressed =
                    inflater.total_in() != in_before || inflater.total_out() != out_before;
                // No progress with room left in the output means the codec
                // is waiting for input that does not exist.
                if !progressed && out.len() < out.capacity() {
                    return Err(DecompressionError::Truncated {
                        consumed: inflater.total_in(),
                        produced: inflater.total_out(),
                    });
                }
            }
        }
    }

    let trailing = data.len() - inflater.total_in() as usize;
    if trailing > 0 {
        warn!(trailing, "ignoring bytes after end of zlib stream");
    }
    debug!(
        compressed = data.len(),
        inflated = out.len(),
        "inflated zlib payload"
    );

    Ok(Cow::Owned(out))
}

/// Compress `data` into a zlib stream at the default level.
///
/// The result always starts with a zlib header, so [`inflate`] will
/// recognise it.
///
/// # Errors
///
/// Propagates I/O errors from the encoder; writing into memory does not
/// produce any in practice.
pub fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    deflate_with_level(data, DEFAULT_COMPRESSION_LEVEL)
}

/// Compress `data` into a zlib stream at `level` (0–9; higher values are
/// clamped to 9).
///
/// # Errors
///
/// Same as [`deflate`].
pub fn deflate_with_level(data: &[u8], level: u32) -> std::io::Result<Vec<u8>> {
    let level = Compression::new(level.min(9));
    let mut enc = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), level);
    enc.write_all(data)?;
    enc.finish()
}

fn initial_capacity(compressed_len: usize, limit: Option<usize>) -> usize {
    let guess = compressed_len.saturating_mul(INITIAL_RATIO).max(MIN_GROWTH);
    match limit {
        // One byte over the limit is enough to detect an overflow.
        Some(limit) => guess.min(limit.saturating_add(1)),
        None => guess,
    }
}
