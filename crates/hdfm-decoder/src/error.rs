use hdfm_codec::DecompressionError;
use hdfm_wire::FormatError;

/// Errors from decoding an HDFM file end to end.
///
/// The two layers stay distinguishable: a `Format` error means the file is
/// not a well-formed HDFM container, a `Decompression` error means the
/// container is fine but its payload claims to be zlib data and is not.
///
/// ```text
///   DecodeError
///   ├── Format(FormatError)                ← magic, lengths, version, truncation
///   └── Decompression(DecompressionError)  ← payload inflate failed
/// ```
///
/// The inner error is reported through [`source`](std::error::Error::source)
/// only, so `{:#}` chains print each message once.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid hdfm container")]
    Format(#[from] FormatError),

    #[error("payload decompression failed")]
    Decompression(#[from] DecompressionError),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    /// Display of `err` followed by every source, joined the way `anyhow`
    /// renders `{:#}`.
    fn chain(err: &DecodeError) -> String {
        let mut parts = vec![err.to_string()];
        let mut source = err.source();
        while let Some(inner) = source {
            parts.push(inner.to_string());
            source = inner.source();
        }
        parts.join(": ")
    }

    #[test]
    fn format_chain_names_each_layer_once() {
        let err = DecodeError::from(FormatError::BadMagic { found: 0x504B_0304 });
        assert_eq!(
            chain(&err),
            "invalid hdfm container: invalid magic: expected \"hdfm\" (0x6864666D), got 0x504B0304"
        );
    }

    #[test]
    fn corrupt_payload_chain_has_no_repeats() {
        let mut compressed = hdfm_codec::deflate(b"records").unwrap();
        let last = compressed.len() - 1;
        compressed[last] ^= 0xFF;
        let err = DecodeError::from(hdfm_codec::inflate(&compressed).unwrap_err());

        let rendered = chain(&err);
        assert!(rendered.starts_with("payload decompression failed: zlib stream corrupt after "));
        assert_eq!(rendered.matches("zlib stream corrupt").count(), 1);
        assert_eq!(rendered.matches("payload decompression failed").count(), 1);
    }
}
