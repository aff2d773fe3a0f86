use std::fs;

use packaudit::files_equal;
use rand::{Rng, SeedableRng};

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

#[test]
fn identical_files_are_equal() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    let data = random_bytes(10_000, 1);
    fs::write(&a, &data).unwrap();
    fs::write(&b, &data).unwrap();
    assert!(files_equal(&a, &b).unwrap());
}

#[test]
fn file_is_equal_to_itself() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.bin");
    fs::write(&a, random_bytes(5000, 2)).unwrap();
    assert!(files_equal(&a, &a).unwrap());
}

#[test]
fn empty_files_are_equal() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    fs::write(&a, b"").unwrap();
    fs::write(&b, b"").unwrap();
    assert!(files_equal(&a, &b).unwrap());
}

#[test]
fn length_mismatch_is_unequal() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    fs::write(&a, b"abc").unwrap();
    fs::write(&b, b"ab").unwrap();
    assert!(!files_equal(&a, &b).unwrap());
}

#[test]
fn single_byte_difference_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    let data = random_bytes(10_000, 3);
    let mut flipped = data.clone();
    flipped[9_999] ^= 0x01;
    fs::write(&a, &data).unwrap();
    fs::write(&b, &flipped).unwrap();
    assert!(!files_equal(&a, &b).unwrap());
    assert!(!files_equal(&b, &a).unwrap());
}

#[test]
fn first_byte_difference_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    let data = random_bytes(4096, 4);
    let mut flipped = data.clone();
    flipped[0] ^= 0x80;
    fs::write(&a, &data).unwrap();
    fs::write(&b, &flipped).unwrap();
    assert!(!files_equal(&a, &b).unwrap());
}

#[test]
fn sizes_straddling_chunk_and_word_boundaries() {
    let dir = tempfile::tempdir().unwrap();
    // 4096 is the comparator chunk size, 8 its word width.
    for len in [1, 7, 8, 9, 4095, 4096, 4097, 8192 + 3] {
        let a = dir.path().join(format!("a_{len}.bin"));
        let b = dir.path().join(format!("b_{len}.bin"));
        let data = random_bytes(len, len as u64);
        fs::write(&a, &data).unwrap();
        fs::write(&b, &data).unwrap();
        assert!(files_equal(&a, &b).unwrap(), "len {len} equal");

        let mut flipped = data.clone();
        flipped[len - 1] ^= 0xFF;
        fs::write(&b, &flipped).unwrap();
        assert!(!files_equal(&a, &b).unwrap(), "len {len} last byte");
    }
}

#[test]
fn length_check_short_circuits_before_any_read() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.bin");
    fs::write(&a, b"xy").unwrap();
    // A directory can be stat'ed but not read as a file; the length
    // probe alone must settle the comparison.
    let b = dir.path().join("sub");
    fs::create_dir(&b).unwrap();
    assert!(!files_equal(&a, &b).unwrap());
}
