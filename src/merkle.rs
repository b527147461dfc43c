use std::fmt;

use log::{debug, trace};

use crate::config::TreeConfig;
use crate::error::{Error, Result};
use crate::hash::{verify_min_security, Algorithm};
use crate::node::{Node, NodeKind};
use crate::proof::{Proof, LEFT, RIGHT};

/// Merkle Tree.
///
/// All leafs and nodes are stored in a linear array (vec), leafs first in
/// input order, then every upper level, root last.
///
/// A merkle tree is a tree in which every non-leaf node is the hash of its
/// children nodes. A diagram depicting how it works:
///
/// ```text
///         root = h1234 = h(h12 + h34)
///        /                           \
///  h12 = h(h1 + h2)            h34 = h(h3 + h4)
///   /            \              /            \
/// h1 = h(tx1)  h2 = h(tx2)    h3 = h(tx3)  h4 = h(tx4)
/// ```
///
/// In memory layout:
///
/// ```text
///     [h1 h2 h3 h4 h12 h34 root]
/// ```
///
/// The number of inputs is not always a power of two. An odd leaf row gets a
/// copy of its last leaf appended (flagged as duplicate), and a node left
/// unpaired on an upper level is hashed with itself:
///
/// ```text
/// [tx1 tx2 tx3]  ->  [h1 h2 h3 h3' h12 h33 root]
/// ```
///
/// This is the Bitcoin construction and it shares its weakness: distinct
/// leaf lists may yield the same root (`[tx1 tx2 tx3]` and
/// `[tx1 tx2 tx3 tx3]` above). Build with
/// [`TreeConfig::reject_duplicate_siblings`] to refuse such trees.
///
/// Leaves are looked up by the digest of their data, so equal data blocks
/// are indistinguishable and the first one in input order is used.
///
/// `&self` operations never mutate and may run concurrently; `update_leaf`
/// takes `&mut self`.
#[derive(Clone)]
pub struct MerkleTree<A: Algorithm> {
    nodes: Vec<Node>,
    leafs: usize,
    width: usize,
    depth: usize,
    alg: A,
    config: TreeConfig,
}

impl<A: Algorithm> MerkleTree<A> {
    /// Creates new merkle tree from a list of data blocks.
    pub fn new<D, I>(data: I, alg: A) -> Result<MerkleTree<A>>
    where
        D: AsRef<[u8]>,
        I: IntoIterator<Item = D>,
    {
        Self::new_with_config(data, alg, TreeConfig::default())
    }

    /// Creates new merkle tree from a list of data blocks, honoring `config`.
    pub fn new_with_config<D, I>(data: I, alg: A, config: TreeConfig) -> Result<MerkleTree<A>>
    where
        D: AsRef<[u8]>,
        I: IntoIterator<Item = D>,
    {
        let mut iter = data.into_iter().peekable();
        if iter.peek().is_none() {
            return Err(Error::EmptyInput);
        }
        if let Some(min) = config.min_digest_len {
            verify_min_security(&alg, min)?;
        }

        // leafs
        let mut nodes: Vec<Node> = Vec::with_capacity(2 * iter.size_hint().0 + 2);
        for item in iter {
            let item = item.as_ref();
            let digest = alg.leaf(item)?;
            nodes.push(Node::new_leaf(item.to_vec(), digest));
        }

        let leafs = nodes.len();
        if leafs & 1 == 1 {
            let dup = nodes[leafs - 1].duplicate();
            nodes.push(dup);
        }
        let width = nodes.len();

        let depth = Self::build(&mut nodes, width, &alg, &config)?;
        debug!(
            "built merkle tree: {} leafs, width {}, depth {}, {} nodes",
            leafs,
            width,
            depth,
            nodes.len()
        );

        Ok(MerkleTree {
            nodes,
            leafs,
            width,
            depth,
            alg,
            config,
        })
    }

    /// Hashes levels pairwise on top of the `width` leafs in `nodes` until a
    /// single root is left. Returns the number of levels built.
    fn build(nodes: &mut Vec<Node>, width: usize, alg: &A, config: &TreeConfig) -> Result<usize> {
        let mut level: usize = 0;
        let mut start: usize = 0;
        let mut end = width;

        while end - start > 1 {
            if (end - start) & 1 == 1 {
                debug!("level {} has odd width {}, pairing last node with itself", level, end - start);
            }

            let mut i = start;
            while i < end {
                let j = if i + 1 < end { i + 1 } else { i };

                if config.reject_duplicate_siblings
                    && j != i
                    && !nodes[j].is_duplicate()
                    && nodes[i].digest == nodes[j].digest
                {
                    return Err(Error::DuplicateSiblings {
                        level,
                        index: i - start,
                    });
                }

                let digest = alg.node(&nodes[i].digest, &nodes[j].digest)?;
                let parent = nodes.len();
                nodes[i].parent = Some(parent);
                nodes[j].parent = Some(parent);
                nodes.push(Node::new_branch(i, j, digest));
                i += 2;
            }

            start = end;
            end = nodes.len();
            level += 1;
        }

        Ok(level)
    }

    /// Children of the branch at `i`.
    fn branch(&self, i: usize) -> (usize, usize) {
        match self.nodes[i].kind {
            NodeKind::Branch { left, right } => (left, right),
            NodeKind::Leaf { .. } => unreachable!("node {} is a parent but a leaf", i),
        }
    }

    /// Returns the arena index of the first leaf holding `data`.
    pub fn find_leaf(&self, data: &[u8]) -> Result<usize> {
        let digest = self.alg.leaf(data)?;
        self.leaves()
            .iter()
            .position(|n| n.digest == digest)
            .ok_or(Error::LeafNotFound)
    }

    /// Generate merkle tree audit proof for `data`: sibling digests from the
    /// leaf level up to, but excluding, the root.
    pub fn gen_proof(&self, data: &[u8]) -> Result<Proof> {
        let mut j = self.find_leaf(data)?;

        let mut lemma: Vec<Vec<u8>> = Vec::with_capacity(self.depth);
        let mut path: Vec<usize> = Vec::with_capacity(self.depth);

        while let Some(p) = self.nodes[j].parent {
            let (left, right) = self.branch(p);
            if left == j {
                // j is left
                lemma.push(self.nodes[right].digest.clone());
                path.push(RIGHT);
            } else {
                // j is right
                lemma.push(self.nodes[left].digest.clone());
                path.push(LEFT);
            }
            j = p;
        }

        Proof::new(lemma, path)
    }

    /// Generate the root path of `data`: the digest of its leaf and of every
    /// ancestor, root included.
    pub fn gen_path(&self, data: &[u8]) -> Result<Proof> {
        let mut j = self.find_leaf(data)?;

        let mut lemma: Vec<Vec<u8>> = Vec::with_capacity(self.depth + 1); // path + root
        let mut path: Vec<usize> = Vec::with_capacity(self.depth + 1);

        while let Some(p) = self.nodes[j].parent {
            let (left, _) = self.branch(p);
            lemma.push(self.nodes[j].digest.clone());
            path.push(if left == j { LEFT } else { RIGHT });
            j = p;
        }

        // root is final
        lemma.push(self.root().to_vec());
        path.push(LEFT);

        Proof::new(lemma, path)
    }

    /// Verifies an audit proof of `data` against the root of this tree.
    pub fn verify(&self, data: &[u8], proof: &Proof) -> Result<bool> {
        proof.validate(&self.alg, data, self.root())
    }

    /// Replaces the first leaf holding `old` with `new` and rehashes its
    /// ancestors.
    ///
    /// Nothing is mutated when `old` is not found or `new` cannot be hashed.
    /// A hash failure while walking up leaves the ancestors above it stale,
    /// the tree must then be rebuilt.
    pub fn update_leaf(&mut self, old: &[u8], new: &[u8]) -> Result<()> {
        let i = self.find_leaf(old)?;
        let digest = self.alg.leaf(new)?;

        self.nodes[i].set_leaf(new, &digest);
        if i + 1 < self.width && self.nodes[i + 1].is_duplicate() {
            self.nodes[i + 1].set_leaf(new, &digest);
        }

        let mut parent = self.nodes[i].parent;
        while let Some(p) = parent {
            let (left, right) = self.branch(p);
            let digest = self.alg.node(&self.nodes[left].digest, &self.nodes[right].digest)?;
            trace!("rehashed node {} from {} and {}", p, left, right);
            self.nodes[p].digest = digest;
            parent = self.nodes[p].parent;
        }

        debug!("updated leaf {}", i);
        Ok(())
    }

    /// Returns merkle root
    pub fn root(&self) -> &[u8] {
        &self.nodes[self.nodes.len() - 1].digest
    }

    /// Returns the number of levels above the leafs, which is the length of
    /// every audit proof.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns original number of elements the tree was built upon.
    pub fn leafs(&self) -> usize {
        self.leafs
    }

    /// Returns the length of the leaf row, duplicate included.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the leaf row, duplicate included.
    pub fn leaves(&self) -> &[Node] {
        &self.nodes[..self.width]
    }

    /// Returns the node at arena index `i`.
    pub fn node(&self, i: usize) -> Option<&Node> {
        self.nodes.get(i)
    }

    /// Returns number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`, a tree has at least a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the configuration the tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Returns the hash algorithm.
    pub fn algorithm(&self) -> &A {
        &self.alg
    }
}

impl<A: Algorithm> fmt::Debug for MerkleTree<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MerkleTree")
            .field("nodes", &self.nodes)
            .field("leafs", &self.leafs)
            .field("width", &self.width)
            .field("depth", &self.depth)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

struct HexSlice<'a>(&'a [u8]);

impl<'a> fmt::Display for HexSlice<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl<A: Algorithm> fmt::Display for MerkleTree<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "depth: {}", self.depth)?;
        writeln!(f, "root: {}", HexSlice(self.root()))?;
        writeln!(f, "leaves:")?;
        for (i, leaf) in self.leaves().iter().enumerate() {
            write!(f, "  {}: {}", i, HexSlice(leaf.digest()))?;
            if leaf.is_duplicate() {
                write!(f, " (duplicate)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
