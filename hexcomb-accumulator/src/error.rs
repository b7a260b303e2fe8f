use thiserror::Error;

use hexcomb_grouped_merkle_tree::GroupedMerkleError;

/// Errors from accumulator operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccumulatorError {
    /// Proof generation or proof handling failed in the proving tree.
    #[error(transparent)]
    Tree(#[from] GroupedMerkleError),
}
