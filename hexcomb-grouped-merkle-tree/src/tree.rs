use std::marker::PhantomData;

use hexcomb_hash::{Arity, Blake3, Digest, DigestAlgorithm, ZERO_DIGEST, group_digest, leaf_digest};

use crate::{GroupedMerkleError, InclusionProof};

/// A materialized k-ary Merkle tree over a fixed leaf digest sequence.
///
/// Level 0 holds the leaf digests; each higher level has
/// `ceil(previous_length / k)` digests. Virtual padding of a short trailing
/// group happens only inside the hash computation — padded duplicates are
/// never stored, so the level lengths above always hold.
#[derive(Debug, Clone)]
pub struct GroupedMerkleTree<D: DigestAlgorithm = Blake3> {
    arity: Arity,
    levels: Vec<Vec<Digest>>,
    _algo: PhantomData<D>,
}

impl<D: DigestAlgorithm> GroupedMerkleTree<D> {
    /// Create an empty tree. Its root is the all-zero sentinel.
    pub fn new(arity: Arity) -> Self {
        GroupedMerkleTree {
            arity,
            levels: Vec::new(),
            _algo: PhantomData,
        }
    }

    /// Build the full tree from an already-collected leaf digest sequence.
    ///
    /// Builds every level in one pass. Appending afterwards is not
    /// supported; rebuild from the updated digest sequence instead.
    pub fn from_leaf_digests(arity: Arity, leaf_digests: Vec<Digest>) -> Self {
        GroupedMerkleTree {
            arity,
            levels: build_levels::<D>(arity, leaf_digests),
            _algo: PhantomData,
        }
    }

    /// Hash each payload into a leaf digest, then build the full tree.
    pub fn from_payloads<'a, I>(arity: Arity, payloads: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let leaf_digests = payloads.into_iter().map(leaf_digest::<D>).collect();
        Self::from_leaf_digests(arity, leaf_digests)
    }

    /// The group size this tree was built with.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// The root digest: the last level's sole digest, or the all-zero
    /// sentinel for an empty tree.
    pub fn root(&self) -> Digest {
        match self.levels.last() {
            Some(level) => level[0],
            None => ZERO_DIGEST,
        }
    }

    /// Number of leaves the tree was built from.
    pub fn leaf_count(&self) -> u64 {
        self.levels.first().map_or(0, |leaves| leaves.len() as u64)
    }

    /// Returns `true` if the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of grouping passes between the leaves and the root (0 for an
    /// empty tree).
    pub fn depth(&self) -> u32 {
        self.levels.len().saturating_sub(1) as u32
    }

    /// The digests of one level: 0 is the leaf level, `depth()` is the root
    /// level. `None` above the root.
    pub fn level(&self, height: u32) -> Option<&[Digest]> {
        self.levels.get(height as usize).map(Vec::as_slice)
    }

    pub(crate) fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// Generate an inclusion proof for the leaf at `leaf_index`.
    ///
    /// Fails with [`GroupedMerkleError::IndexOutOfRange`] if the index is
    /// not in `[0, leaf_count)`. Read-only.
    pub fn generate_proof(&self, leaf_index: u64) -> Result<InclusionProof, GroupedMerkleError> {
        InclusionProof::generate(self, leaf_index)
    }
}

/// Materialize all levels bottom-up.
///
/// A non-empty tree always gets at least one grouping pass: a single leaf
/// yields a root of `H(leaf || ... k copies ...)`, never the leaf digest
/// itself.
fn build_levels<D: DigestAlgorithm>(arity: Arity, leaf_digests: Vec<Digest>) -> Vec<Vec<Digest>> {
    if leaf_digests.is_empty() {
        return Vec::new();
    }
    let k = arity.get();
    let mut levels = vec![leaf_digests];
    loop {
        let current = levels.last().expect("levels start non-empty");
        let next: Vec<Digest> = current
            .chunks(k)
            .map(|group| group_digest::<D>(group, arity))
            .collect();
        let done = next.len() == 1;
        levels.push(next);
        if done {
            return levels;
        }
    }
}
