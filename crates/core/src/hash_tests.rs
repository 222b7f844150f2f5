// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn random_gen_creates_seven_alphanumeric_chars() {
    let hashes = RandomHashGen;
    let hash = hashes.next();
    assert_eq!(hash.len(), HASH_LEN);
    assert!(hash.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn random_gen_creates_distinct_hashes() {
    let hashes = RandomHashGen;
    assert_ne!(hashes.next(), hashes.next());
}

#[test]
fn sequential_gen_creates_predictable_hashes() {
    let hashes = SequentialHashGen::new();
    assert_eq!(hashes.next(), "0000001");
    assert_eq!(hashes.next(), "0000002");
    assert_eq!(hashes.next(), "0000003");
}

#[test]
fn sequential_gen_is_cloneable_and_shared() {
    let hashes1 = SequentialHashGen::new();
    let hashes2 = hashes1.clone();
    assert_eq!(hashes1.next(), "0000001");
    assert_eq!(hashes2.next(), "0000002");
    assert_eq!(hashes1.next(), "0000003");
}

#[test]
fn sequential_gen_matches_hash_length() {
    let hashes = SequentialHashGen::new();
    assert_eq!(hashes.next().len(), HASH_LEN);
}
