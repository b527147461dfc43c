//! Hash infrastructure for the Merkle tree.

use crate::error::{Error, Result};

/// Digest length, in bytes, under which an algorithm is considered too weak
/// (128 bits).
pub const MIN_SECURE_DIGEST_LEN: usize = 16;

/// Fixed probe hashed by [`verify_min_security`].
const SECURITY_PROBE: [u8; 7] = [1, 2, 3, 4, 5, 6, 7];

/// Hashing algorithm.
///
/// The tree never picks an algorithm on its own: callers pass one in at
/// construction and every digest the tree computes, stores or checks goes
/// through it. The contract is fallible, a failing `hash` aborts the running
/// operation with [`Error::HashComputation`].
///
/// Any `Fn(&[u8]) -> anyhow::Result<Vec<u8>>` is an `Algorithm`:
///
/// ```
/// use merkle_tree::hash::Algorithm;
/// use sha2::{Digest, Sha256};
///
/// let sha256 = |data: &[u8]| -> anyhow::Result<Vec<u8>> { Ok(Sha256::digest(data).to_vec()) };
/// assert_eq!(sha256.hash(b"abc").unwrap().len(), 32);
/// ```
///
/// ## Leaf and node combinators
///
/// [`leaf`] and [`node`] default to `hash(data)` and `hash(left || right)`.
/// Override them to get domain separation, e.g. the _Certificate
/// Transparency_ [RFC 6962](https://tools.ietf.org/html/rfc6962) scheme:
///
/// ```text
/// leaf(d)    = ALG(0x00 || d)
/// node(l, r) = ALG(0x01 || l || r)
/// ```
///
/// [`leaf`]: Algorithm::leaf
/// [`node`]: Algorithm::node
pub trait Algorithm {
    /// Returns the digest of `data`.
    fn hash(&self, data: &[u8]) -> anyhow::Result<Vec<u8>>;

    /// Returns the digest stored in a leaf holding `data`.
    fn leaf(&self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        self.hash(data)
    }

    /// Returns the digest of an interior node from its children digests.
    fn node(&self, left: &[u8], right: &[u8]) -> anyhow::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(left.len() + right.len());
        buf.extend_from_slice(left);
        buf.extend_from_slice(right);
        self.hash(&buf)
    }
}

impl<F> Algorithm for F
where
    F: Fn(&[u8]) -> anyhow::Result<Vec<u8>>,
{
    #[inline]
    fn hash(&self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        self(data)
    }
}

/// Checks that `alg` yields digests of at least `min` bytes.
///
/// The algorithm is probed once on a fixed input, its failure is reported
/// as [`Error::HashComputation`].
pub fn verify_min_security<A: Algorithm>(alg: &A, min: usize) -> Result<()> {
    let len = alg.hash(&SECURITY_PROBE)?.len();
    if len < min {
        return Err(Error::InsecureHash { len, min });
    }
    Ok(())
}
