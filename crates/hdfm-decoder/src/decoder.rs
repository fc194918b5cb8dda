use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use hdfm_codec::compression::inflate_with_limit;
use hdfm_wire::{FormatError, Hdfm, HdfmHeader};
use tracing::debug;

use crate::config::{DecoderConfig, InflateMode};
use crate::error::DecodeError;

/// The result of decoding an HDFM file.
///
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │ DecodedLibrary                                       │
/// │   header:      HdfmHeader ← version, raw fields      │
/// │   payload:     Vec<u8>    ← inflated (or as stored)  │
/// │   stored_size: usize      ← payload size in the file │
/// │   inflated:    bool       ← zlib stream was inflated │
/// └──────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedLibrary {
    pub header: HdfmHeader,

    /// Library database bytes, ready for a record parser.
    pub payload: Vec<u8>,

    /// Size of the payload as stored after the header, before inflating.
    pub stored_size: usize,

    /// `true` when the stored payload was a zlib stream and `payload`
    /// holds its inflated contents.
    pub inflated: bool,
}

/// Decoder for whole HDFM files: header first, then the payload.
///
/// Decoding proceeds in two steps:
///
///   1. **Header**: read and validate the header block, then read exactly
///      `total_length - header_length` bytes of file data
///      ([`Hdfm::read`]).
///   2. **Payload**: unless [`InflateMode::Never`] is configured, inflate
///      the file data when it starts with a zlib header; plain file data
///      is moved into the result without copying.
///
/// # Example
///
/// ```rust
/// use hdfm_decoder::{DecoderConfig, HdfmDecoder};
/// use hdfm_wire::{Hdfm, HdfmHeader};
///
/// let file = Hdfm {
///     header: HdfmHeader::new("8.0").unwrap(),
///     file_data: hdfm_codec::deflate(b"records").unwrap(),
/// };
/// let mut bytes = Vec::new();
/// file.write_to(&mut bytes).unwrap();
///
/// let decoded = HdfmDecoder::decode_bytes(&bytes, &DecoderConfig::default()).unwrap();
/// assert_eq!(decoded.header.version, "8.0");
/// assert_eq!(decoded.payload, b"records");
/// assert!(decoded.inflated);
/// ```
pub struct HdfmDecoder;

impl HdfmDecoder {
    /// Decode an HDFM file of `total_length` bytes from `reader`.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Format`] for any header or length violation.
    /// - [`DecodeError::Decompression`] if the payload carries a zlib
    ///   header but does not inflate, or inflates past
    ///   `config.max_inflated_size`.
    pub fn decode<R: Read>(
        reader: &mut R,
        total_length: u64,
        config: &DecoderConfig,
    ) -> Result<DecodedLibrary, DecodeError> {
        let Hdfm { header, file_data } = Hdfm::read(reader, total_length)?;
        let stored_size = file_data.len();

        let inflated = match config.inflate {
            InflateMode::Never => None,
            InflateMode::Auto => match inflate_with_limit(&file_data, config.max_inflated_size)? {
                Cow::Owned(bytes) => Some(bytes),
                Cow::Borrowed(_) => None,
            },
        };

        let (payload, inflated) = match inflated {
            Some(bytes) => (bytes, true),
            None => (file_data, false),
        };

        debug!(
            version = %header.version,
            stored_size,
            payload = payload.len(),
            inflated,
            "decoded hdfm library"
        );

        Ok(DecodedLibrary {
            header,
            payload,
            stored_size,
            inflated,
        })
    }

    /// Decode an HDFM file held in memory. The slice length is the total
    /// length.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn decode_bytes(buf: &[u8], config: &DecoderConfig) -> Result<DecodedLibrary, DecodeError> {
        let mut reader = buf;
        Self::decode(&mut reader, buf.len() as u64, config)
    }

    /// Open `path` and decode it, taking the total length from the file's
    /// metadata.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode); failing to open or stat the file
    /// is reported as [`FormatError::Io`].
    pub fn decode_path(path: &Path, config: &DecoderConfig) -> Result<DecodedLibrary, DecodeError> {
        let file = File::open(path).map_err(FormatError::from)?;
        let total_length = file.metadata().map_err(FormatError::from)?.len();
        let mut reader = BufReader::new(file);
        Self::decode(&mut reader, total_length, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdfm_codec::DecompressionError;

    fn file_bytes(version: &str, payload: &[u8]) -> Vec<u8> {
        let file = Hdfm {
            header: HdfmHeader::new(version).unwrap(),
            file_data: payload.to_vec(),
        };
        let mut bytes = Vec::new();
        file.write_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn plain_payload_is_kept() {
        let bytes = file_bytes("6.0.4", b"plain records");
        let decoded = HdfmDecoder::decode_bytes(&bytes, &DecoderConfig::default()).unwrap();
        assert_eq!(decoded.header.version, "6.0.4");
        assert_eq!(decoded.payload, b"plain records");
        assert_eq!(decoded.stored_size, 13);
        assert!(!decoded.inflated);
    }

    #[test]
    fn compressed_payload_is_inflated() {
        let records = b"mhbd records ".repeat(100);
        let bytes = file_bytes("8.0", &hdfm_codec::deflate(&records).unwrap());
        let decoded = HdfmDecoder::decode_bytes(&bytes, &DecoderConfig::default()).unwrap();
        assert_eq!(decoded.payload, records);
        assert!(decoded.stored_size < records.len());
        assert!(decoded.inflated);
    }

    #[test]
    fn never_mode_keeps_stored_bytes() {
        let compressed = hdfm_codec::deflate(b"records").unwrap();
        let bytes = file_bytes("8.0", &compressed);
        let config = DecoderConfig {
            inflate: InflateMode::Never,
            ..DecoderConfig::default()
        };
        let decoded = HdfmDecoder::decode_bytes(&bytes, &config).unwrap();
        assert_eq!(decoded.payload, compressed);
        assert!(!decoded.inflated);
    }

    #[test]
    fn bad_magic_is_a_format_error() {
        let mut bytes = file_bytes("8.0", b"records");
        bytes[..4].copy_from_slice(b"hdfx");
        let result = HdfmDecoder::decode_bytes(&bytes, &DecoderConfig::default());
        assert!(matches!(
            result,
            Err(DecodeError::Format(FormatError::BadMagic { .. }))
        ));
    }

    #[test]
    fn corrupt_payload_is_a_decompression_error() {
        let mut compressed = hdfm_codec::deflate(b"records").unwrap();
        let last = compressed.len() - 1;
        compressed[last] ^= 0xFF;
        let bytes = file_bytes("8.0", &compressed);
        let result = HdfmDecoder::decode_bytes(&bytes, &DecoderConfig::default());
        assert!(matches!(
            result,
            Err(DecodeError::Decompression(DecompressionError::Corrupt { .. }))
        ));
    }

    #[test]
    fn size_limit_is_applied() {
        let records = b"mhbd records ".repeat(100);
        let bytes = file_bytes("8.0", &hdfm_codec::deflate(&records).unwrap());
        let config = DecoderConfig {
            max_inflated_size: Some(64),
            ..DecoderConfig::default()
        };
        let result = HdfmDecoder::decode_bytes(&bytes, &config);
        assert!(matches!(
            result,
            Err(DecodeError::Decompression(DecompressionError::SizeLimit { limit: 64 }))
        ));
    }

    #[test]
    fn decode_path_uses_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iTunes Library.itl");
        std::fs::write(&path, file_bytes("8.0", b"records")).unwrap();

        let decoded = HdfmDecoder::decode_path(&path, &DecoderConfig::default()).unwrap();
        assert_eq!(decoded.payload, b"records");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = HdfmDecoder::decode_path(
            Path::new("/nonexistent/iTunes Library.itl"),
            &DecoderConfig::default(),
        );
        assert!(matches!(result, Err(DecodeError::Format(FormatError::Io(_)))));
    }
}
