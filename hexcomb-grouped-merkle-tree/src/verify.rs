//! Proof verification for the grouped Merkle tree.
//!
//! Pure function — no tree or storage required. Recomputes the root from
//! the leaf payload and the per-level sibling sets and compares it to the
//! expected root. Invalid input is an expected outcome, so verification
//! returns a boolean and never an error.

use hexcomb_hash::{Arity, Digest, DigestAlgorithm, leaf_digest};

use crate::proof::{InclusionProof, MAX_PROOF_LEVELS};

impl InclusionProof {
    /// Verify that `payload` is the leaf at `leaf_index` of the tree whose
    /// root is `expected_root`.
    ///
    /// Returns `false` for any mismatch — tampered payload, wrong index,
    /// wrong root, or a malformed proof shape. Never panics on untrusted
    /// input.
    pub fn verify<D: DigestAlgorithm>(
        &self,
        leaf_index: u64,
        payload: &[u8],
        expected_root: &Digest,
    ) -> bool {
        let Ok(arity) = Arity::from_byte(self.arity) else {
            return false;
        };
        if self.siblings.len() > MAX_PROOF_LEVELS {
            return false;
        }
        let k = arity.get() as u64;

        let mut digest = leaf_digest::<D>(payload);
        let mut index = leaf_index;
        for set in &self.siblings {
            if set.len() != arity.get() - 1 {
                return false;
            }
            let offset = (index % k) as usize;
            digest = D::hash_parts(
                set[..offset]
                    .iter()
                    .map(|d| d.as_slice())
                    .chain(std::iter::once(digest.as_slice()))
                    .chain(set[offset..].iter().map(|d| d.as_slice())),
            );
            index /= k;
        }

        // An index at or beyond the proved tree's capacity shares its
        // base-k offset sequence with a real leaf; requiring the running
        // index to reach zero rejects those aliases.
        index == 0 && digest == *expected_root
    }
}
