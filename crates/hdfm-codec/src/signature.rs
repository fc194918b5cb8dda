/// How a buffer presents itself before any decompression is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadKind {
    /// No zlib header; the bytes are used as they are.
    Plain,
    /// Starts with a valid zlib header. Only inflating the whole buffer
    /// can confirm it.
    ProbablyCompressed,
}

/// Check whether `data` starts with a valid two-byte zlib header.
///
/// ```text
///   CMF          FLG
///   ┌────┬────┐  ┌──────────┐
///   │info│ CM │  │  flags   │     CM must be 8 (DEFLATE)
///   └────┴────┘  └──────────┘     (CMF << 8 | FLG) % 31 == 0
/// ```
///
/// Common headers: `78 01`, `78 5E`, `78 9C`, `78 DA`.
pub fn is_zlib_header(data: &[u8]) -> bool {
    match data {
        [cmf, flg, ..] => cmf & 0x0F == 8 && u16::from_be_bytes([*cmf, *flg]) % 31 == 0,
        _ => false,
    }
}

/// Classify a buffer by its leading bytes.
pub fn classify(data: &[u8]) -> PayloadKind {
    if is_zlib_header(data) {
        PayloadKind::ProbablyCompressed
    } else {
        PayloadKind::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_zlib_headers_match() {
        for header in [[0x78, 0x01], [0x78, 0x5E], [0x78, 0x9C], [0x78, 0xDA]] {
            assert!(is_zlib_header(&header), "{header:02X?} should match");
        }
    }

    #[test]
    fn small_window_headers_match() {
        // CINFO below 7: smaller windows, still DEFLATE.
        assert!(is_zlib_header(&[0x08, 0x1D]));
        assert!(is_zlib_header(&[0x58, 0x85]));
    }

    #[test]
    fn wrong_method_is_plain() {
        // 0x79 has CM = 9.
        assert!(!is_zlib_header(&[0x79, 0x9C]));
    }

    #[test]
    fn bad_check_bits_are_plain() {
        assert!(!is_zlib_header(&[0x78, 0x9D]));
        assert!(!is_zlib_header(&[0x78, 0x00]));
    }

    #[test]
    fn short_buffers_are_plain() {
        assert_eq!(classify(&[]), PayloadKind::Plain);
        assert_eq!(classify(&[0x78]), PayloadKind::Plain);
    }

    #[test]
    fn text_is_plain() {
        assert_eq!(classify(b"Uncompressed."), PayloadKind::Plain);
        assert_eq!(classify(b"hdfm"), PayloadKind::Plain);
    }

    #[test]
    fn trailing_bytes_do_not_matter() {
        assert_eq!(
            classify(&[0x78, 0x9C, 0xFF, 0xFF]),
            PayloadKind::ProbablyCompressed
        );
    }
}
