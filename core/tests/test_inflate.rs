//! Decompressor coverage: golden vectors, truncation policy, error behavior.

use flate_core::{deflate_with, inflate, inflate_with, FlateError, Inflater};

/// Raw deflate of a short greeting, captured from a standard zlib encoder.
const RAW_HELLO: [u8; 8] = [0xF3, 0x48, 0xCD, 0xC9, 0xC9, 0x57, 0x04, 0x00];

/// The same payload wrapped in a zlib frame (header plus Adler-32 trailer).
const ZLIB_HELLO: [u8; 14] = [
    0x78, 0x9C, 0xF3, 0x48, 0xCD, 0xC9, 0xC9, 0x57, 0x04, 0x00, 0x07, 0xA2, 0x02, 0x16,
];

#[test]
fn raw_golden_vector() {
    let data = inflate(&RAW_HELLO, true).unwrap();
    assert!(!data.is_empty());
    assert_eq!(data, b"Hello!");
}

#[test]
fn framed_golden_vector() {
    let data = inflate(&ZLIB_HELLO, false).unwrap();
    assert_eq!(data, b"Hello!");
}

#[test]
fn manual_drive_golden_vector() {
    let mut inflater = Inflater::new(true);
    assert!(inflater.needs_input());
    inflater.set_input(&RAW_HELLO);
    assert!(!inflater.needs_input());

    let mut out = [0u8; 32];
    let n = inflater.inflate(&mut out).unwrap();
    assert_eq!(&out[..n], b"Hello!");
    assert!(inflater.finished());
    assert_eq!(inflater.inflate(&mut out).unwrap(), 0);
    assert!(inflater.finished());
}

#[test]
fn drains_in_small_pieces() {
    let mut inflater = Inflater::new(false);
    inflater.set_input(&ZLIB_HELLO);
    let mut restored = Vec::new();
    let mut piece = [0u8; 2];
    while !inflater.finished() {
        let n = inflater.inflate(&mut piece).unwrap();
        restored.extend_from_slice(&piece[..n]);
        if n == 0 && inflater.needs_input() {
            break;
        }
    }
    assert_eq!(restored, b"Hello!");
}

#[test]
fn truncated_raw_stream_is_end_of_stream() {
    let data = b"truncation should be quiet, not fatal. ".repeat(128);
    let compressed = deflate_with(&data, true, 6, 4096).unwrap();
    let cut = &compressed[..compressed.len() / 2];
    let restored = inflate(cut, true).unwrap();
    assert!(data.starts_with(&restored));
}

#[test]
fn truncated_framed_trailer_still_yields_data() {
    let data = b"missing checksum trailer. ".repeat(8);
    let mut compressed = deflate_with(&data, false, 6, 4096).unwrap();
    compressed.truncate(compressed.len() - 4);
    let restored = inflate(&compressed, false).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn garbage_after_stream_end_is_ignored() {
    let mut input = RAW_HELLO.to_vec();
    input.extend_from_slice(b"trailing junk");
    assert_eq!(inflate(&input, true).unwrap(), b"Hello!");
}

#[test]
fn corrupt_framed_header_errors() {
    let err = inflate(&[0xFF, 0xFF, 0xAB, 0xCD, 0x00], false).unwrap_err();
    assert!(matches!(err, FlateError::CorruptStream { .. }));
}

#[test]
fn corrupt_raw_block_type_errors() {
    // BFINAL set with the reserved block type 11.
    let err = inflate(&[0x07, 0x00, 0x00, 0x00], true).unwrap_err();
    assert!(matches!(err, FlateError::CorruptStream { .. }));
}

#[test]
fn checksum_mismatch_errors() {
    let mut bad = ZLIB_HELLO;
    bad[13] ^= 0xFF;
    let err = inflate(&bad, false).unwrap_err();
    assert!(matches!(err, FlateError::CorruptStream { .. }));
}

#[test]
fn empty_input_is_empty_output() {
    for raw in [true, false] {
        assert_eq!(inflate(&[], raw).unwrap(), Vec::<u8>::new(), "raw={raw}");
    }
}
