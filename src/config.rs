use crate::hash::MIN_SECURE_DIGEST_LEN;

/// Construction options of a [`MerkleTree`].
///
/// The default is permissive: no digest length check and duplicate sibling
/// digests accepted, which matches trees built with [`MerkleTree::new`].
///
/// [`MerkleTree`]: crate::merkle::MerkleTree
/// [`MerkleTree::new`]: crate::merkle::MerkleTree::new
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeConfig {
    /// Minimum digest length, in bytes, the algorithm must produce.
    pub min_digest_len: Option<usize>,

    /// Reject trees in which two distinct, non-synthetic siblings share a
    /// digest. Such trees have the same root as a tree built from a
    /// different leaf list (CVE-2012-2459), e.g. `[A, B, C]` and
    /// `[A, B, C, C]`.
    pub reject_duplicate_siblings: bool,
}

impl TreeConfig {
    /// Permissive configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires at least [`MIN_SECURE_DIGEST_LEN`] byte digests and rejects
    /// duplicate siblings.
    pub fn strict() -> Self {
        TreeConfig {
            min_digest_len: Some(MIN_SECURE_DIGEST_LEN),
            reject_duplicate_siblings: true,
        }
    }

    /// Sets the minimum digest length.
    pub fn with_min_digest_len(mut self, len: usize) -> Self {
        self.min_digest_len = Some(len);
        self
    }

    /// Enables or disables duplicate sibling rejection.
    pub fn with_reject_duplicate_siblings(mut self, reject: bool) -> Self {
        self.reject_duplicate_siblings = reject;
        self
    }
}
