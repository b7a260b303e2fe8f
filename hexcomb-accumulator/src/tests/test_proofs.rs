use proptest::prelude::*;
use proptest::sample::Index;

use crate::{
    Accumulator, AccumulatorError, Blake3, GroupedMerkleError, GroupedMerkleTree, InclusionProof,
};

use super::arity;

fn accumulator_with(count: usize, k: usize) -> Accumulator<Blake3> {
    let mut acc = Accumulator::<Blake3>::new(arity(k));
    for i in 0..count {
        acc.append(format!("leaf-{}", i).into_bytes());
    }
    acc
}

#[test]
fn test_proof_roundtrip_small_counts() {
    for count in 1usize..=13 {
        let acc = accumulator_with(count, 4);
        let root = acc.tree_root();
        for i in 0..count as u64 {
            let payload = format!("leaf-{}", i).into_bytes();
            let proof = acc.generate_proof(i).expect("generate proof");
            assert!(
                proof.verify::<Blake3>(i, &payload, &root),
                "leaf {} of {} should verify against the tree root",
                i,
                count
            );
        }
    }
}

#[test]
fn test_proof_targets_tree_root_not_frontier_root() {
    // The streaming and proving commitments are different objects; a
    // proof verifies against the tree root only. Pinned so the dual-root
    // contract cannot silently regress.
    let acc = accumulator_with(3, 4);
    assert_ne!(acc.frontier_root(), acc.tree_root());

    let proof = acc.generate_proof(0).expect("generate proof");
    assert!(proof.verify::<Blake3>(0, b"leaf-0", &acc.tree_root()));
    assert!(!proof.verify::<Blake3>(0, b"leaf-0", &acc.frontier_root()));
}

#[test]
fn test_roots_differ_even_at_exact_powers_of_arity() {
    // With k^2 leaves both constructions build the same single aggregate,
    // but the frontier root hashes the peak list once more.
    let acc = accumulator_with(16, 4);
    let peak: Vec<_> = acc.peaks().collect();
    assert_eq!(peak.len(), 1);
    assert_eq!(peak[0].digest(), acc.tree_root());
    assert_ne!(acc.frontier_root(), acc.tree_root());
}

#[test]
fn test_tree_root_matches_standalone_tree() {
    let acc = accumulator_with(11, 6);
    let tree = GroupedMerkleTree::<Blake3>::from_leaf_digests(arity(6), acc.leaf_digests());
    assert_eq!(acc.tree_root(), tree.root());
}

#[test]
fn test_proof_cache_invalidated_by_append() {
    let mut acc = accumulator_with(5, 4);
    let root_before = acc.tree_root();
    let proof_before = acc.generate_proof(2).expect("generate proof");
    assert!(proof_before.verify::<Blake3>(2, b"leaf-2", &root_before));

    acc.append(b"leaf-5".to_vec());
    let root_after = acc.tree_root();
    assert_ne!(root_before, root_after);

    // A stale proof no longer verifies; a fresh one does.
    assert!(!proof_before.verify::<Blake3>(2, b"leaf-2", &root_after));
    let proof_after = acc.generate_proof(2).expect("generate proof");
    assert!(proof_after.verify::<Blake3>(2, b"leaf-2", &root_after));
}

#[test]
fn test_generate_proof_out_of_range() {
    let acc = accumulator_with(3, 4);
    let err = acc.generate_proof(3).expect_err("index 3 is out of range");
    assert!(matches!(
        err,
        AccumulatorError::Tree(GroupedMerkleError::IndexOutOfRange {
            index: 3,
            leaf_count: 3
        })
    ));

    let empty = Accumulator::<Blake3>::new(arity(4));
    assert!(empty.generate_proof(0).is_err());
}

#[test]
fn test_proof_serialization_through_accumulator() {
    let acc = accumulator_with(9, 4);
    let root = acc.tree_root();
    let bytes = acc
        .generate_proof(4)
        .expect("generate proof")
        .encode_to_vec()
        .expect("encode proof");
    let decoded = InclusionProof::decode_from_slice(&bytes).expect("decode proof");
    assert!(decoded.verify::<Blake3>(4, b"leaf-4", &root));
}

#[test]
fn test_proof_digest_count_matches_arity() {
    // Every level contributes exactly k - 1 sibling digests.
    let acc = accumulator_with(20, 4);
    let proof = acc.generate_proof(10).expect("generate proof");
    assert_eq!(proof.digest_count(), proof.level_count() * 3);
}

proptest! {
    #[test]
    fn test_proof_roundtrip_random(
        count in 1usize..90,
        k in 2usize..8,
        index in any::<Index>()
    ) {
        let acc = accumulator_with(count, k);
        let root = acc.tree_root();
        let i = index.index(count) as u64;
        let payload = format!("leaf-{}", i).into_bytes();
        let proof = acc.generate_proof(i).expect("generate proof");
        prop_assert!(proof.verify::<Blake3>(i, &payload, &root));
    }

    #[test]
    fn test_tampered_payload_fails_verification(
        count in 1usize..60,
        index in any::<Index>(),
        bit in 0usize..8,
        byte in any::<Index>()
    ) {
        let acc = accumulator_with(count, 4);
        let root = acc.tree_root();
        let i = index.index(count) as u64;
        let mut payload = format!("leaf-{}", i).into_bytes();
        let proof = acc.generate_proof(i).expect("generate proof");

        let byte_idx = byte.index(payload.len());
        payload[byte_idx] ^= 1 << bit;
        prop_assert!(!proof.verify::<Blake3>(i, &payload, &root));
    }

    #[test]
    fn test_wrong_index_fails_verification(
        count in 2usize..60,
        index in any::<Index>(),
        other in any::<Index>()
    ) {
        let acc = accumulator_with(count, 4);
        let root = acc.tree_root();
        let i = index.index(count) as u64;
        let mut j = other.index(count) as u64;
        if i == j {
            j = (j + 1) % count as u64;
        }
        let proof = acc.generate_proof(i).expect("generate proof");
        let payload = format!("leaf-{}", i).into_bytes();
        prop_assert!(!proof.verify::<Blake3>(j, &payload, &root));
    }
}
