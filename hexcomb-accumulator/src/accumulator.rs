//! The streaming accumulator: append-only node registry plus peak
//! frontier, with cascading k-run merges.

use std::sync::OnceLock;

use hexcomb_grouped_merkle_tree::{GroupedMerkleTree, InclusionProof};
use hexcomb_hash::{Arity, Blake3, Digest, DigestAlgorithm, ZERO_DIGEST, group_digest, leaf_digest};

use crate::{AccumulatorError, LeafRecord, Node};

/// A streaming k-ary hash accumulator.
///
/// Two commitments are exposed, by name:
///
/// - [`frontier_root`](Accumulator::frontier_root) — the streaming
///   commitment: a flat hash of the live peak digests, left to right.
///   This is what [`append`](Accumulator::append) returns.
/// - [`tree_root`](Accumulator::tree_root) — the canonical proving
///   commitment: the root of the duplicate-padded grouped tree over the
///   leaf digest sequence. [`generate_proof`](Accumulator::generate_proof)
///   is answered by this tree, and proofs verify against this root only.
///
/// The two are different objects and agree on no leaf count; callers pick
/// one by name rather than inheriting a silently mismatched pair.
///
/// Mutation requires `&mut self`, so at most one append is in flight and
/// readers never observe a half-applied merge cascade. The proving tree is
/// cached in a [`OnceLock`] that `append` replaces, so concurrent `&self`
/// readers safely share one rebuilt snapshot.
pub struct Accumulator<D: DigestAlgorithm = Blake3> {
    arity: Arity,
    nodes: Vec<Node>,
    leaves: Vec<LeafRecord>,
    peaks: Vec<u64>,
    proving_tree: OnceLock<GroupedMerkleTree<D>>,
}

impl<D: DigestAlgorithm> Accumulator<D> {
    /// Create an empty accumulator with the given group size.
    pub fn new(arity: Arity) -> Self {
        Accumulator {
            arity,
            nodes: Vec::new(),
            leaves: Vec::new(),
            peaks: Vec::new(),
            proving_tree: OnceLock::new(),
        }
    }

    /// The group size this accumulator merges with.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Append a payload (any byte string, including empty) and return the
    /// new frontier root.
    ///
    /// Creates the leaf node at the next position, then merges the
    /// trailing run of equal-height peaks whenever it reaches `k`,
    /// cascading upward. Always succeeds; amortized O(1) hashing per
    /// append, O(log_k n) on a full cascade.
    pub fn append(&mut self, payload: Vec<u8>) -> Digest {
        let digest = leaf_digest::<D>(&payload);
        let position = self.next_position();
        self.nodes.push(Node::new(position, 0, digest));
        self.leaves.push(LeafRecord::new(position, payload));
        self.peaks.push(position);
        self.merge_trailing_runs();
        // The cached proving tree no longer matches the leaf sequence.
        self.proving_tree = OnceLock::new();
        self.frontier_root()
    }

    /// The streaming commitment: `H(peak_1 || ... || peak_m)` over the
    /// live peak digests in left-to-right order, or the all-zero sentinel
    /// when empty.
    ///
    /// Every append changes this value even without a merge, because the
    /// newest leaf enters the hash as a peak.
    pub fn frontier_root(&self) -> Digest {
        if self.peaks.is_empty() {
            return ZERO_DIGEST;
        }
        let parts: Vec<Digest> = self.peaks.iter().map(|&pos| self.digest_at(pos)).collect();
        D::hash_parts(parts.iter().map(|d| d.as_slice()))
    }

    /// Maximum height among the current peaks; 0 when empty or all-leaf.
    pub fn depth(&self) -> u32 {
        self.peaks
            .iter()
            .map(|&pos| self.height_at(pos))
            .max()
            .unwrap_or(0)
    }

    /// The canonical proving commitment: root of the grouped tree over
    /// the current leaf digest sequence (all-zero sentinel when empty).
    pub fn tree_root(&self) -> Digest {
        self.proving_tree().root()
    }

    /// Generate an inclusion proof for the leaf at `leaf_index`
    /// (0-based), verifiable against [`tree_root`](Accumulator::tree_root).
    ///
    /// Fails for an index outside `[0, leaf_count)`; never mutates.
    pub fn generate_proof(&self, leaf_index: u64) -> Result<InclusionProof, AccumulatorError> {
        Ok(self.proving_tree().generate_proof(leaf_index)?)
    }

    /// Number of leaves appended so far.
    pub fn leaf_count(&self) -> u64 {
        self.leaves.len() as u64
    }

    /// Total number of nodes created so far (leaves plus aggregates).
    pub fn node_count(&self) -> u64 {
        self.nodes.len() as u64
    }

    /// Returns `true` if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// The committed leaf at `leaf_index` (0-based), if any.
    pub fn leaf(&self, leaf_index: u64) -> Option<&LeafRecord> {
        self.leaves.get(leaf_index as usize)
    }

    /// The node at a 1-based registry position, if it exists yet.
    pub fn node(&self, position: u64) -> Option<&Node> {
        position
            .checked_sub(1)
            .and_then(|i| self.nodes.get(i as usize))
    }

    /// All registry nodes in creation order. This is the sequence an
    /// external dump renders as position/height/digest rows.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// The current peaks in left-to-right order.
    pub fn peaks(&self) -> impl Iterator<Item = &Node> {
        self.peaks.iter().map(|&pos| {
            self.node(pos)
                .expect("peak positions always resolve in the registry")
        })
    }

    /// The leaf digest sequence in insertion order.
    pub fn leaf_digests(&self) -> Vec<Digest> {
        self.leaves
            .iter()
            .map(|leaf| self.digest_at(leaf.position()))
            .collect()
    }

    fn proving_tree(&self) -> &GroupedMerkleTree<D> {
        self.proving_tree
            .get_or_init(|| GroupedMerkleTree::from_leaf_digests(self.arity, self.leaf_digests()))
    }

    fn next_position(&self) -> u64 {
        self.nodes.len() as u64 + 1
    }

    fn digest_at(&self, position: u64) -> Digest {
        self.nodes[(position - 1) as usize].digest()
    }

    fn height_at(&self, position: u64) -> u32 {
        self.nodes[(position - 1) as usize].height()
    }

    /// Merge while the trailing run of equal-height peaks has length `k`.
    ///
    /// Each merge pops exactly `k` peaks and pushes one, so the peak count
    /// strictly decreases and the loop terminates; on exit no trailing
    /// equal-height run has length ≥ `k`. A run can never exceed `k`
    /// because it is merged the moment it reaches `k`.
    fn merge_trailing_runs(&mut self) {
        let k = self.arity.get();
        loop {
            let run = self.trailing_run_len();
            if run < k {
                return;
            }
            debug_assert_eq!(run, k, "equal-height runs merge at exactly k");

            let tail_height = self.height_at(*self.peaks.last().expect("run is non-empty"));
            let cut = self.peaks.len() - k;
            let parent_digest = {
                let nodes = &self.nodes;
                // drain preserves the popped peaks' left-to-right order
                let group: Vec<Digest> = self
                    .peaks
                    .drain(cut..)
                    .map(|pos| nodes[(pos - 1) as usize].digest())
                    .collect();
                group_digest::<D>(&group, self.arity)
            };
            let position = self.next_position();
            self.nodes
                .push(Node::new(position, tail_height + 1, parent_digest));
            self.peaks.push(position);
        }
    }

    /// Length of the trailing run of peaks sharing the last peak's height.
    fn trailing_run_len(&self) -> usize {
        let Some(&last) = self.peaks.last() else {
            return 0;
        };
        let height = self.height_at(last);
        self.peaks
            .iter()
            .rev()
            .take_while(|&&pos| self.height_at(pos) == height)
            .count()
    }
}
