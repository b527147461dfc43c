use std::fmt;

use thiserror::Error;

/// Result of every fallible tree operation.
pub type Result<T> = std::result::Result<T, Error>;

/// What differed between two proofs at the reported index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// Digests differ.
    Hash,
    /// Direction bits differ.
    Direction,
    /// One proof ends before the other.
    Length,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mismatch::Hash => f.write_str("hash"),
            Mismatch::Direction => f.write_str("index"),
            Mismatch::Length => f.write_str("length"),
        }
    }
}

/// Merkle tree errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A tree was requested over zero data blocks.
    #[error("cannot build a merkle tree without any data")]
    EmptyInput,

    /// The supplied hash algorithm failed.
    #[error("hash computation failed: {0}")]
    HashComputation(#[from] anyhow::Error),

    /// No leaf digest matches the queried data.
    #[error("data doesn't exist in the tree")]
    LeafNotFound,

    /// Two proofs differ, `index` is the first differing position.
    #[error("proof mismatch at {index} for the {kind}")]
    ProofMismatch {
        /// First differing position.
        index: usize,
        /// What differed there.
        kind: Mismatch,
    },

    /// Proof lemma and path do not describe a valid proof.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// The algorithm produces digests shorter than the configured minimum.
    #[error("hash function is not secure enough, digest is {len} bytes, require a min of {min}")]
    InsecureHash {
        /// Produced digest length in bytes.
        len: usize,
        /// Required digest length in bytes.
        min: usize,
    },

    /// Two distinct sibling nodes share a digest (strict construction only).
    #[error("duplicate sibling digests at level {level}, index {index}")]
    DuplicateSiblings {
        /// Tree level, leaves are level 0.
        level: usize,
        /// Position of the left sibling within its level.
        index: usize,
    },
}
