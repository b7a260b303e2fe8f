use thiserror::Error;

/// Errors from grouped Merkle tree operations.
#[derive(Debug, Error)]
pub enum GroupedMerkleError {
    /// The requested leaf index is not in `[0, leaf_count)`.
    #[error("leaf index {index} is out of range (leaf count {leaf_count})")]
    IndexOutOfRange {
        /// The rejected index.
        index: u64,
        /// The tree's leaf count at the time of the request.
        leaf_count: u64,
    },
    /// Proof (de)serialization failed or decoded into an invalid shape.
    #[error("invalid proof encoding: {0}")]
    ProofEncoding(String),
}
