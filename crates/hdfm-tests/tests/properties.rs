//! Property tests for the header decoder and the payload inflater.

use hdfm_codec::{deflate_with_level, inflate, is_zlib_header};
use hdfm_wire::{FormatError, Hdfm, HdfmHeader};
use proptest::prelude::*;

/// A header with arbitrary reserved bytes, version and padding, and a
/// `header_length` that matches them.
fn arb_header() -> impl Strategy<Value = HdfmHeader> {
    (
        any::<[u8; 8]>(),
        "[ -~]{0,40}",
        proptest::collection::vec(any::<u8>(), 0..200),
    )
        .prop_map(|(reserved, version, padding)| HdfmHeader {
            header_length: u32::try_from(17 + version.len() + padding.len()).unwrap(),
            reserved,
            version,
            padding,
        })
}

proptest! {
    #[test]
    fn file_data_is_total_minus_header(
        header in arb_header(),
        payload in proptest::collection::vec(any::<u8>(), 0..1024),
    ) {
        let mut bytes = Vec::new();
        Hdfm { header: header.clone(), file_data: payload.clone() }
            .write_to(&mut bytes)
            .unwrap();

        let header_length = header.header_length as usize;
        for total in [header_length, header_length + payload.len() / 2, bytes.len()] {
            let hdfm = Hdfm::read(&mut bytes.as_slice(), total as u64).unwrap();
            prop_assert_eq!(hdfm.file_data.len(), total - header_length);
            prop_assert_eq!(&hdfm.file_data[..], &payload[..total - header_length]);
            prop_assert_eq!(&hdfm.header, &header);
        }
    }

    #[test]
    fn header_reencodes_identically(header in arb_header()) {
        let mut first = Vec::new();
        header.write_to(&mut first).unwrap();
        let decoded = HdfmHeader::read_from(&mut first.as_slice()).unwrap();
        let mut second = Vec::new();
        decoded.write_to(&mut second).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn wrong_magic_is_rejected(
        magic in any::<[u8; 4]>(),
        rest in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        prop_assume!(magic != *b"hdfm");
        let mut bytes = magic.to_vec();
        bytes.extend_from_slice(&rest);
        let result = Hdfm::from_bytes(&bytes);
        let is_bad_magic = matches!(
            result,
            Err(FormatError::BadMagic { found }) if found == u32::from_be_bytes(magic)
        );
        prop_assert!(is_bad_magic);
    }

    #[test]
    fn arbitrary_input_never_panics(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        if let Ok(hdfm) = Hdfm::from_bytes(&data) {
            prop_assert_eq!(hdfm.total_length(), data.len() as u64);
        }
    }

    #[test]
    fn deflate_then_inflate_is_identity(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        level in 0u32..=9,
    ) {
        let compressed = deflate_with_level(&data, level).unwrap();
        prop_assert!(is_zlib_header(&compressed));
        let inflated = inflate(&compressed).unwrap();
        prop_assert_eq!(inflated.as_ref(), data.as_slice());
    }

    #[test]
    fn plain_data_passes_through(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
        prop_assume!(!is_zlib_header(&data));
        let inflated = inflate(&data).unwrap();
        prop_assert_eq!(inflated.as_ref(), data.as_slice());
    }
}
