//! Binary _Merkle Tree_ implementation with inclusion proofs and leaf updates.
//!
//! Merkle Tree (MT) built over an ordered list of byte blocks, with nodes
//! allocated in a vec and linked by index. The hashing algorithm is supplied
//! by the caller, so the implementation does not depend on any crypto
//! library and never picks a digest on its own.
//!
//! Every leaf holds `hash(data)` and every interior node
//! `hash(left || right)`. An odd leaf row is padded with a copy of its last
//! leaf, and an unpaired node on an upper level is hashed with itself, as in
//! Bitcoin:
//!
//! ```text
//! MTH([d0 d1 d2]) = H(H(H(d0) || H(d1)) || H(H(d2) || H(d2)))
//! ```
//!
//! Link: <https://en.wikipedia.org/wiki/Merkle_tree>
//!
//! # Interface
//!
//! ```text
//! - new (blocks, alg) -> tree
//! - root -> hash
//! - gen_proof (data) -> audit proof
//! - gen_path (data) -> root path
//! - verify (data, proof) -> bool
//! - update_leaf (old, new)
//! ```
//!
//! # Quick start
//!
//! ```
//! use merkle_tree::MerkleTree;
//! use sha2::{Digest, Sha256};
//!
//! fn sha256(data: &[u8]) -> anyhow::Result<Vec<u8>> {
//!     Ok(Sha256::digest(data).to_vec())
//! }
//!
//! let blocks = ["Hello", "Hi", "Hey", "Hola"];
//! let mut tree = MerkleTree::new(&blocks, sha256).unwrap();
//!
//! let proof = tree.gen_proof(b"Hey").unwrap();
//! assert_eq!(proof.len(), tree.depth());
//! assert!(tree.verify(b"Hey", &proof).unwrap());
//!
//! tree.update_leaf(b"Hey", b"Howdy").unwrap();
//! assert!(!tree.verify(b"Hey", &proof).unwrap());
//! let proof = tree.gen_proof(b"Howdy").unwrap();
//! assert!(tree.verify(b"Howdy", &proof).unwrap());
//! ```

#![deny(
    missing_docs,
    unused_qualifications,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]

/// Hash infrastructure for the Merkle tree.
pub mod hash;

/// Error and result types.
pub mod error;

/// Construction options.
pub mod config;

/// Tree vertices.
pub mod node;

/// Merkle tree inclusion proofs.
pub mod proof;

/// Merkle tree construction, proofs and updates.
pub mod merkle;

pub use config::TreeConfig;
pub use error::{Error, Mismatch, Result};
pub use hash::{verify_min_security, Algorithm, MIN_SECURE_DIGEST_LEN};
pub use merkle::MerkleTree;
pub use node::{Node, NodeKind};
pub use proof::Proof;

#[cfg(test)]
mod test_common;

/// Tests XOR128.
#[cfg(test)]
mod test_xor128;

/// Tests for Merkle Hasher Customization
#[cfg(test)]
mod test_cmh;
