/// Leaf or interior payload of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf holding one input block.
    Leaf {
        /// The original data block.
        data: Vec<u8>,
        /// Synthetic copy of the preceding leaf, appended to even out the leaf row.
        duplicate: bool,
    },
    /// Interior node. `left == right` when the node was paired with itself.
    Branch {
        /// Arena index of the left child.
        left: usize,
        /// Arena index of the right child.
        right: usize,
    },
}

/// Tree vertex.
///
/// Nodes live in the tree arena and refer to each other by index; the
/// `parent` link is a back-reference used only for upward walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) digest: Vec<u8>,
    pub(crate) parent: Option<usize>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new_leaf(data: Vec<u8>, digest: Vec<u8>) -> Node {
        Node {
            digest,
            parent: None,
            kind: NodeKind::Leaf {
                data,
                duplicate: false,
            },
        }
    }

    pub(crate) fn new_branch(left: usize, right: usize, digest: Vec<u8>) -> Node {
        Node {
            digest,
            parent: None,
            kind: NodeKind::Branch { left, right },
        }
    }

    /// Returns a detached copy of this leaf flagged as duplicate.
    pub(crate) fn duplicate(&self) -> Node {
        let data = self.data().unwrap_or_default().to_vec();
        Node {
            digest: self.digest.clone(),
            parent: None,
            kind: NodeKind::Leaf {
                data,
                duplicate: true,
            },
        }
    }

    /// Replaces the leaf content, keeping the duplicate flag. No-op on branches.
    pub(crate) fn set_leaf(&mut self, value: &[u8], digest: &[u8]) {
        if let NodeKind::Leaf { data, .. } = &mut self.kind {
            data.clear();
            data.extend_from_slice(value);
            self.digest.clear();
            self.digest.extend_from_slice(digest);
        }
    }

    /// Node digest.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Arena index of the parent, `None` for the root.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Leaf or branch payload.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns `true` for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Returns `true` for the synthetic padding leaf.
    pub fn is_duplicate(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { duplicate: true, .. })
    }

    /// Data block of a leaf.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.kind {
            NodeKind::Leaf { data, .. } => Some(data),
            NodeKind::Branch { .. } => None,
        }
    }

    /// Arena indexes of the `(left, right)` children of a branch.
    pub fn children(&self) -> Option<(usize, usize)> {
        match self.kind {
            NodeKind::Branch { left, right } => Some((left, right)),
            NodeKind::Leaf { .. } => None,
        }
    }
}
