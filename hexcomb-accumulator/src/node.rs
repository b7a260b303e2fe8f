//! Registry entries: nodes and committed leaf payloads.

use std::fmt;

use hexcomb_hash::Digest;

/// An entry in the accumulator's append-only node registry.
///
/// Height 0 nodes are leaf-derived; a height `h + 1` node digests a group
/// of `k` height-`h` nodes. Positions are 1-based, strictly increasing,
/// and never reused. Nodes are immutable once created and live for the
/// accumulator's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    position: u64,
    height: u32,
    digest: Digest,
}

impl Node {
    pub(crate) fn new(position: u64, height: u32, digest: Digest) -> Self {
        Node {
            position,
            height,
            digest,
        }
    }

    /// The node's 1-based position in the registry.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Height within the structure: 0 for leaf-derived nodes.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The node's 32-byte digest.
    pub fn digest(&self) -> Digest {
        self.digest
    }

    /// Returns `true` for leaf-derived (height 0) nodes.
    pub fn is_leaf(&self) -> bool {
        self.height == 0
    }
}

impl fmt::Display for Node {
    /// `position <TAB> height <TAB> hex digest` — one registry dump row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.position,
            self.height,
            hex::encode(self.digest)
        )
    }
}

/// A committed leaf: the raw payload and the 1-based position of its
/// height-0 node. Immutable, owned by the accumulator that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafRecord {
    position: u64,
    payload: Vec<u8>,
}

impl LeafRecord {
    pub(crate) fn new(position: u64, payload: Vec<u8>) -> Self {
        LeafRecord { position, payload }
    }

    /// The 1-based position of the leaf's node in the registry.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// The raw payload as appended.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}
