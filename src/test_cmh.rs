#![cfg(test)]

use crate::hash::Algorithm;
use crate::merkle::MerkleTree;
use crate::proof::Proof;
use crate::test_common::{blocks, sha256};

/// Custom merkle hash util test: RFC 6962 leaf and interior prefixes.
#[derive(Debug, Clone, Copy, Default)]
struct CMH;

impl Algorithm for CMH {
    fn hash(&self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        sha256(data)
    }

    fn leaf(&self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        let mut buf = vec![0x00];
        buf.extend_from_slice(data);
        self.hash(&buf)
    }

    fn node(&self, left: &[u8], right: &[u8]) -> anyhow::Result<Vec<u8>> {
        let mut buf = vec![0x01];
        buf.extend_from_slice(left);
        buf.extend_from_slice(right);
        self.hash(&buf)
    }
}

#[test]
fn test_custom_merkle_hasher() {
    let data = blocks(&["1", "2", "3", "4", "5"]);
    let mt = MerkleTree::new(&data, CMH).unwrap();
    let plain = MerkleTree::new(&data, sha256).unwrap();
    assert_ne!(mt.root(), plain.root());

    let a = CMH;
    for (leaf, d) in mt.leaves().iter().zip(&data) {
        assert_eq!(leaf.digest(), &a.leaf(d).unwrap()[..]);
    }

    for d in &data {
        let p = mt.gen_proof(d).unwrap();
        assert!(mt.verify(d, &p).unwrap());

        // an interior node digest is not accepted as a leaf
        let (mut lemma, mut path) = p.into_parts();
        let leaf = a.leaf(d).unwrap();
        let sibling = lemma.remove(0);
        let side = path.remove(0);
        let parent = if side == 0 {
            a.node(&sibling, &leaf).unwrap()
        } else {
            a.node(&leaf, &sibling).unwrap()
        };
        let shortened = Proof::new(lemma, path).unwrap();
        assert!(!shortened.validate(&a, &parent, mt.root()).unwrap());
    }
}

#[test]
fn test_custom_hasher_update() {
    let data = blocks(&["1", "2", "3"]);
    let mut mt = MerkleTree::new(&data, CMH).unwrap();
    mt.update_leaf(b"3", b"9").unwrap();

    let rebuilt = MerkleTree::new(blocks(&["1", "2", "9"]), CMH).unwrap();
    assert_eq!(mt.root(), rebuilt.root());
    assert_eq!(mt.gen_path(b"9").unwrap(), rebuilt.gen_path(b"9").unwrap());
}
