//! Inclusion proof generation for the grouped Merkle tree.
//!
//! A proof holds one sibling set per level below the root: the `k - 1`
//! other members of the (virtually padded) group containing the running
//! index, in left-to-right order. Padding duplicates appear in the sibling
//! set exactly as they entered the group hash, so verification can replay
//! the same concatenations.

use bincode::{Decode, Encode};

use hexcomb_hash::{Arity, Digest, DigestAlgorithm};

use crate::{GroupedMerkleError, GroupedMerkleTree};

/// Upper bound on proof levels accepted from untrusted bytes. A 64-bit
/// leaf index exhausts after 64 base-k digits even at k = 2.
pub(crate) const MAX_PROOF_LEVELS: usize = 64;

/// Decode size limit for serialized proofs.
const MAX_PROOF_BYTES: usize = 16 * 1024 * 1024;

/// An inclusion proof for a single leaf of a [`GroupedMerkleTree`].
///
/// Fields are `pub(crate)` so proofs only come from
/// [`generate`](InclusionProof::generate) or
/// [`decode_from_slice`](InclusionProof::decode_from_slice).
#[derive(Debug, Clone, Encode, Decode)]
pub struct InclusionProof {
    /// Group size of the tree the proof was generated from.
    pub(crate) arity: u8,
    /// One sibling set per level below the root, each of exactly
    /// `arity - 1` digests.
    pub(crate) siblings: Vec<Vec<Digest>>,
}

impl InclusionProof {
    /// Generate a proof for the leaf at `leaf_index`.
    ///
    /// Fails with [`GroupedMerkleError::IndexOutOfRange`] if the index is
    /// not in `[0, leaf_count)`; the tree is never mutated.
    pub fn generate<D: DigestAlgorithm>(
        tree: &GroupedMerkleTree<D>,
        leaf_index: u64,
    ) -> Result<Self, GroupedMerkleError> {
        let leaf_count = tree.leaf_count();
        if leaf_index >= leaf_count {
            return Err(GroupedMerkleError::IndexOutOfRange {
                index: leaf_index,
                leaf_count,
            });
        }

        let k = tree.arity().get();
        let levels = tree.levels();
        let mut siblings = Vec::with_capacity(levels.len() - 1);
        let mut index = leaf_index as usize;
        for level in &levels[..levels.len() - 1] {
            let start = (index / k) * k;
            let group = &level[start..level.len().min(start + k)];
            let last = group.last().expect("group contains the running index");
            let mut set = Vec::with_capacity(k - 1);
            for slot in 0..k {
                if start + slot == index {
                    continue;
                }
                // Slots past the group's real length replay the virtual
                // padding.
                set.push(*group.get(slot).unwrap_or(last));
            }
            siblings.push(set);
            index /= k;
        }

        Ok(InclusionProof {
            arity: tree.arity().to_byte(),
            siblings,
        })
    }

    /// The group size recorded in this proof.
    pub fn arity(&self) -> u8 {
        self.arity
    }

    /// Number of levels (sibling sets) in this proof.
    pub fn level_count(&self) -> usize {
        self.siblings.len()
    }

    /// Total number of sibling digests across all levels.
    pub fn digest_count(&self) -> usize {
        self.siblings.iter().map(Vec::len).sum()
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, GroupedMerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| GroupedMerkleError::ProofEncoding(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode, validating the decoded shape:
    /// arity in `2..=255`, at most [`MAX_PROOF_LEVELS`] levels, and exactly
    /// `arity - 1` digests per sibling set.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, GroupedMerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<MAX_PROOF_BYTES>();
        let (proof, _): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| GroupedMerkleError::ProofEncoding(format!("decode error: {}", e)))?;
        let arity = Arity::from_byte(proof.arity).map_err(|e| {
            GroupedMerkleError::ProofEncoding(format!("invalid group size in proof: {}", e))
        })?;
        if proof.siblings.len() > MAX_PROOF_LEVELS {
            return Err(GroupedMerkleError::ProofEncoding(format!(
                "proof has {} levels (max {})",
                proof.siblings.len(),
                MAX_PROOF_LEVELS
            )));
        }
        for (level, set) in proof.siblings.iter().enumerate() {
            if set.len() != arity.get() - 1 {
                return Err(GroupedMerkleError::ProofEncoding(format!(
                    "sibling set at level {} has {} digests, expected {}",
                    level,
                    set.len(),
                    arity.get() - 1
                )));
            }
        }
        Ok(proof)
    }
}
