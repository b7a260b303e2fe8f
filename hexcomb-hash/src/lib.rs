//! Digest model shared by the hexcomb accumulator and grouped Merkle tree.
//!
//! Every commitment in hexcomb is built from two operations:
//!
//! - a leaf digest: `H(payload)`, and
//! - a group digest: `H(d_1 || d_2 || ... || d_k)` over exactly `k` child
//!   digests in left-to-right insertion order.
//!
//! A group shorter than `k` is padded at hashing time by repeating its final
//! digest. The padding is never materialized: [`group_digest`] streams the
//! repeated digest into the hasher, so a padded copy can never be mistaken
//! for a stored node.
//!
//! The digest algorithm is a type parameter ([`DigestAlgorithm`]) chosen at
//! construction of each accumulator or tree instance. All supported
//! algorithms emit 32-byte digests, so digest widths cannot be mixed within
//! an instance.

#![warn(missing_docs)]

use thiserror::Error;

/// A 32-byte digest.
pub type Digest = [u8; 32];

/// The all-zero digest reported as the root of an empty structure.
pub const ZERO_DIGEST: Digest = [0u8; 32];

/// Group size out of the supported `2..=255` range.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("group size must be in 2..=255, got {0}")]
pub struct InvalidArity(usize);

/// Validated group size (branching factor) `k`.
///
/// Serialized proofs carry the arity as a single byte, hence the `2..=255`
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity(u8);

impl Arity {
    /// Validate and wrap a group size.
    pub fn new(k: usize) -> Result<Self, InvalidArity> {
        if (2..=255).contains(&k) {
            Ok(Arity(k as u8))
        } else {
            Err(InvalidArity(k))
        }
    }

    /// The group size as a `usize`.
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// The single-byte encoding used in serialized proofs.
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Reconstruct an arity from its single-byte encoding.
    pub fn from_byte(byte: u8) -> Result<Self, InvalidArity> {
        Self::new(byte as usize)
    }
}

/// A fixed-output 32-byte digest algorithm.
///
/// Implementations are zero-sized markers; the algorithm for an accumulator
/// or tree is fixed by its type parameter at construction and cannot change
/// for the lifetime of the instance.
pub trait DigestAlgorithm {
    /// Short algorithm name for diagnostics.
    const NAME: &'static str;

    /// Digest a single byte string.
    fn hash(data: &[u8]) -> Digest {
        Self::hash_parts([data])
    }

    /// Digest the concatenation of `parts`, streamed in order without an
    /// intermediate buffer.
    fn hash_parts<'a, I>(parts: I) -> Digest
    where
        I: IntoIterator<Item = &'a [u8]>;
}

/// BLAKE3-256.
#[derive(Debug, Clone, Copy)]
pub struct Blake3;

impl DigestAlgorithm for Blake3 {
    const NAME: &'static str = "blake3";

    fn hash(data: &[u8]) -> Digest {
        *blake3::hash(data).as_bytes()
    }

    fn hash_parts<'a, I>(parts: I) -> Digest
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(part);
        }
        *hasher.finalize().as_bytes()
    }
}

/// SHA-256.
#[derive(Debug, Clone, Copy)]
pub struct Sha256;

impl DigestAlgorithm for Sha256 {
    const NAME: &'static str = "sha256";

    fn hash_parts<'a, I>(parts: I) -> Digest
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        use sha2::Digest as _;

        let mut hasher = sha2::Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize().into()
    }
}

/// Compute a leaf digest: `H(payload)`.
pub fn leaf_digest<D: DigestAlgorithm>(payload: &[u8]) -> Digest {
    D::hash(payload)
}

/// Compute a group digest over up to `k` child digests in left-to-right
/// order, virtually padding a short group by repeating its final digest
/// until exactly `k` members enter the hash.
///
/// `group` must be non-empty and no longer than `arity`.
pub fn group_digest<D: DigestAlgorithm>(group: &[Digest], arity: Arity) -> Digest {
    debug_assert!(!group.is_empty(), "group digest over an empty group");
    debug_assert!(group.len() <= arity.get(), "group longer than arity");
    let last = group.last().expect("non-empty group");
    D::hash_parts(
        (0..arity.get()).map(|slot| group.get(slot).unwrap_or(last).as_slice()),
    )
}
