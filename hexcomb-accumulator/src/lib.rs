//! Streaming k-ary hash accumulator — an append-only authenticated
//! structure over opaque byte payloads.
//!
//! Leaves arrive one at a time. Each append creates a height-0 node in a
//! grow-only registry and pushes it onto the peak frontier; whenever the
//! trailing run of equal-height peaks reaches `k`, the run is merged into
//! one node a level higher, cascading until no such run remains. The
//! frontier root — a flat hash of all current peak digests — changes on
//! every append and commits to every leaf so far.
//!
//! Inclusion proofs are served from the canonical grouped-tree
//! construction over the leaf digest sequence (see [`Accumulator`] for the
//! two-commitment model), rebuilt lazily after appends.
//!
//! # Core types
//!
//! - [`Accumulator`] — append, roots, depth, proof generation.
//! - [`Node`] / [`LeafRecord`] — registry entries and committed payloads.
//! - [`InclusionProof`] — re-exported proof type (verify, encode/decode).

#![warn(missing_docs)]

mod accumulator;
mod error;
mod node;

#[cfg(test)]
mod tests;

pub use accumulator::Accumulator;
pub use error::AccumulatorError;
pub use hexcomb_grouped_merkle_tree::{GroupedMerkleError, GroupedMerkleTree, InclusionProof};
pub use hexcomb_hash::{
    Arity, Blake3, Digest, DigestAlgorithm, InvalidArity, Sha256, ZERO_DIGEST, group_digest,
    leaf_digest,
};
pub use node::{LeafRecord, Node};
