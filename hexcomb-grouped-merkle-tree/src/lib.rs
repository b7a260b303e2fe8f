//! Grouped (k-ary) Merkle tree over a fixed leaf digest sequence.
//!
//! The tree is materialized bottom-up: level 0 is the leaf digests, each
//! higher level hashes consecutive groups of `k` digests (a short trailing
//! group is padded at hashing time by repeating its final digest), and the
//! last level holds the single root. Building always performs at least one
//! grouping pass, so even a single leaf is committed under a group hash
//! rather than exposed as its own digest.
//!
//! Construction is batch-only: the tree is recomputed from scratch per
//! invocation and never appended to in place.
//!
//! # Core types
//!
//! - [`GroupedMerkleTree`] — build from leaf digests or payloads, read the
//!   root, generate proofs.
//! - [`InclusionProof`] — per-level sibling sets for one leaf; verifies
//!   against the root with a boolean result.

#![warn(missing_docs)]

mod error;
mod proof;
mod tree;
mod verify;


pub use error::GroupedMerkleError;
pub use proof::InclusionProof;
pub use tree::GroupedMerkleTree;
