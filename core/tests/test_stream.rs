//! Stream adapter coverage: chunk-size sweeps, read patterns, end-of-stream
//! policy, and equivalence with the one-shot helpers.

use std::io::Read;

use flate_core::{deflate_with, inflate_with, DeflatingReader, FlateExt, InflatingReader};
use proptest::prelude::*;
use rand::{RngCore, SeedableRng};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn read_in_steps<R: Read>(mut reader: R, step: usize) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; step];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Ok(out);
        }
        out.extend_from_slice(&buf[..n]);
    }
}

/// Compressible but not constant.
fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8 ^ (i / 7) as u8).collect()
}

#[test]
fn adapter_round_trip_across_chunk_sizes() {
    let data = sample(16 * 1024);
    for raw in [true, false] {
        for chunk in [1usize, 3, 7, 64, 4096, 65536] {
            let mut compressed = Vec::new();
            DeflatingReader::with_chunk_size(&data[..], raw, 6, chunk)
                .read_to_end(&mut compressed)
                .unwrap();
            let mut restored = Vec::new();
            InflatingReader::with_chunk_size(&compressed[..], raw, chunk)
                .read_to_end(&mut restored)
                .unwrap();
            assert_eq!(restored, data, "raw={raw} chunk={chunk}");
        }
    }
}

#[test]
fn adapter_matches_one_shot() {
    let data = sample(32 * 1024);

    let mut compressed = Vec::new();
    (&data[..])
        .deflating(false, 6)
        .read_to_end(&mut compressed)
        .unwrap();
    assert_eq!(inflate_with(&compressed, false, 1024).unwrap(), data);

    let compressed = deflate_with(&data, false, 6, 1024).unwrap();
    let mut restored = Vec::new();
    (&compressed[..])
        .inflating(false)
        .read_to_end(&mut restored)
        .unwrap();
    assert_eq!(restored, data);
}

#[test]
fn chained_adapters_round_trip() {
    let data = sample(8 * 1024);
    let mut restored = Vec::new();
    (&data[..])
        .deflating(true, 6)
        .inflating(true)
        .read_to_end(&mut restored)
        .unwrap();
    assert_eq!(restored, data);
}

#[test]
fn read_patterns_do_not_change_output() {
    let data = sample(10_000);
    let whole = {
        let mut v = Vec::new();
        (&data[..]).deflating(true, 6).read_to_end(&mut v).unwrap();
        v
    };
    for step in [1usize, 2, 13, 300, 4096] {
        let stepped = read_in_steps((&data[..]).deflating(true, 6), step).unwrap();
        assert_eq!(stepped, whole, "step={step}");
        let restored = read_in_steps((&stepped[..]).inflating(true), step).unwrap();
        assert_eq!(restored, data, "step={step}");
    }
}

#[test]
fn zero_length_read_is_a_no_op() {
    let data = sample(512);
    let mut reader = (&data[..]).deflating(true, 6);
    assert_eq!(reader.read(&mut []).unwrap(), 0);
    let mut compressed = Vec::new();
    reader.read_to_end(&mut compressed).unwrap();
    assert_eq!(inflate_with(&compressed, true, 64).unwrap(), data);

    let mut inflating = InflatingReader::new(&compressed[..], true);
    assert_eq!(inflating.read(&mut []).unwrap(), 0);
    let mut restored = Vec::new();
    inflating.read_to_end(&mut restored).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn empty_upstream_still_produces_a_stream() {
    let empty: &[u8] = &[];
    let mut compressed = Vec::new();
    empty
        .deflating(false, 6)
        .read_to_end(&mut compressed)
        .unwrap();
    assert!(!compressed.is_empty());
    let mut restored = Vec::new();
    (&compressed[..])
        .inflating(false)
        .read_to_end(&mut restored)
        .unwrap();
    assert!(restored.is_empty());
}

#[test]
fn truncated_upstream_is_quiet_eof() {
    init_logs();
    let data = sample(4096);
    let compressed = deflate_with(&data, false, 6, 256).unwrap();
    let cut = &compressed[..compressed.len() - 4];
    let mut restored = Vec::new();
    cut.inflating(false).read_to_end(&mut restored).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn corrupt_upstream_fails_the_read() {
    let garbage = [0xFFu8, 0xFF, 0xAB, 0xCD, 0x00, 0x11];
    let mut restored = Vec::new();
    let err = (&garbage[..])
        .inflating(false)
        .read_to_end(&mut restored)
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn large_random_round_trip_through_adapters() {
    init_logs();
    let mut data = vec![0u8; 33 * 1024 * 1024];
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xA5A5);
    rng.fill_bytes(&mut data);

    let mut compressed = Vec::new();
    (&data[..])
        .deflating(true, 6)
        .read_to_end(&mut compressed)
        .unwrap();
    let mut restored = Vec::new();
    (&compressed[..])
        .inflating(true)
        .read_to_end(&mut restored)
        .unwrap();
    assert_eq!(restored, data);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn streaming_equivalence(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        chunk in 1usize..2048,
        step in 1usize..512,
        raw in any::<bool>(),
    ) {
        let mut compressed = Vec::new();
        DeflatingReader::with_chunk_size(&data[..], raw, 6, chunk)
            .read_to_end(&mut compressed)
            .unwrap();

        let one_shot = inflate_with(&compressed, raw, chunk).unwrap();
        prop_assert_eq!(&one_shot, &data);

        let adapted = read_in_steps(
            InflatingReader::with_chunk_size(&compressed[..], raw, chunk),
            step,
        )
        .unwrap();
        prop_assert_eq!(&adapted, &data);
    }
}
