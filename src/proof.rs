use crate::error::{Error, Mismatch, Result};
use crate::hash::Algorithm;

#[cfg(test)]
use crate::test_common::{blocks, sha256};

/// Direction bit: the accompanying digest is the left operand.
pub const LEFT: usize = 0;

/// Direction bit: the accompanying digest is the right operand.
pub const RIGHT: usize = 1;

/// Merkle tree inclusion proof.
///
/// Two shapes share this type. An audit proof, from
/// [`MerkleTree::gen_proof`], lists sibling digests bottom-up:
///
/// ```text
/// lemma: [ s0 s1 s2 ... ]        path: [ b0 b1 b2 ... ]
/// ```
///
/// where `bi` tells on which side `si` enters the next combination. A root
/// path, from [`MerkleTree::gen_path`], lists the digests of the leaf and of
/// each ancestor instead, ending with the root:
///
/// ```text
/// lemma: [ leaf h1x h2y ... root ] path: [ b0 b1 b2 ... 0 ]
/// ```
///
/// Only audit proofs can be [`validate`]d.
///
/// [`MerkleTree::gen_proof`]: crate::merkle::MerkleTree::gen_proof
/// [`MerkleTree::gen_path`]: crate::merkle::MerkleTree::gen_path
/// [`validate`]: Proof::validate
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Proof {
    lemma: Vec<Vec<u8>>,
    path: Vec<usize>, // direction bits
}

impl Proof {
    /// Creates new MT inclusion proof.
    pub fn new(lemma: Vec<Vec<u8>>, path: Vec<usize>) -> Result<Proof> {
        if lemma.len() != path.len() {
            return Err(Error::MalformedProof(format!(
                "{} digests for {} direction bits",
                lemma.len(),
                path.len()
            )));
        }
        if let Some(i) = path.iter().position(|&bit| bit > RIGHT) {
            return Err(Error::MalformedProof(format!(
                "direction bit {} at {} is neither {} nor {}",
                path[i], i, LEFT, RIGHT
            )));
        }
        Ok(Proof { lemma, path })
    }

    /// Returns the digests of this proof.
    pub fn lemma(&self) -> &[Vec<u8>] {
        &self.lemma
    }

    /// Returns the direction bits of this proof.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Number of `(digest, direction)` pairs.
    pub fn len(&self) -> usize {
        self.lemma.len()
    }

    /// Returns `true` for a proof without any step.
    pub fn is_empty(&self) -> bool {
        self.lemma.is_empty()
    }

    /// Iterates over `(digest, direction)` pairs, bottom-up.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], usize)> + '_ {
        self.lemma
            .iter()
            .map(Vec::as_slice)
            .zip(self.path.iter().cloned())
    }

    /// Splits the proof into its digests and direction bits.
    pub fn into_parts(self) -> (Vec<Vec<u8>>, Vec<usize>) {
        (self.lemma, self.path)
    }

    /// Recomputes the root digest implied by this audit proof for `data`.
    pub fn compute_root<A: Algorithm>(&self, alg: &A, data: &[u8]) -> Result<Vec<u8>> {
        let mut h = alg.leaf(data)?;
        for (sibling, side) in self.iter() {
            h = if side == LEFT {
                alg.node(sibling, &h)?
            } else {
                alg.node(&h, sibling)?
            };
        }
        Ok(h)
    }

    /// Verifies this audit proof for `data` against `root`.
    pub fn validate<A: Algorithm>(&self, alg: &A, data: &[u8], root: &[u8]) -> Result<bool> {
        Ok(self.compute_root(alg, data)? == root)
    }

    /// Compares two proofs element-wise, reporting the first difference.
    pub fn compare(&self, other: &Proof) -> Result<()> {
        for (index, (a, b)) in self.iter().zip(other.iter()).enumerate() {
            if a.0 != b.0 {
                return Err(Error::ProofMismatch {
                    index,
                    kind: Mismatch::Hash,
                });
            }
            if a.1 != b.1 {
                return Err(Error::ProofMismatch {
                    index,
                    kind: Mismatch::Direction,
                });
            }
        }
        if self.len() != other.len() {
            return Err(Error::ProofMismatch {
                index: self.len().min(other.len()),
                kind: Mismatch::Length,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
// Break one byte of one element inside the proof.
fn modify_proof(proof: &mut Proof) {
    use rand::prelude::*;

    let i = random::<usize>() % proof.lemma.len();
    let j = random::<usize>() % proof.lemma[i].len();
    let k = random::<u8>() | 1;

    proof.lemma[i][j] ^= k;
}

#[test]
fn test_proofs() {
    use crate::merkle::MerkleTree;

    for leafs in 1..=33 {
        let data: Vec<Vec<u8>> = (0..leafs).map(|i| format!("block{}", i * 93).into_bytes()).collect();
        let tree = MerkleTree::new(&data, sha256).unwrap();

        for d in &data {
            let mut p = tree.gen_proof(d).unwrap();
            assert_eq!(p.len(), tree.depth());
            assert!(p.validate(&sha256, d, tree.root()).unwrap());
            assert!(tree.verify(d, &p).unwrap());

            // Break the proof here and assert negative validation.
            modify_proof(&mut p);
            assert!(!p.validate(&sha256, d, tree.root()).unwrap());
            assert!(!tree.verify(d, &p).unwrap());
        }
    }
}

#[test]
fn test_new_rejects_malformed() {
    assert!(matches!(
        Proof::new(vec![vec![1]], vec![]),
        Err(Error::MalformedProof(_))
    ));
    assert!(matches!(
        Proof::new(vec![vec![1], vec![2]], vec![0, 2]),
        Err(Error::MalformedProof(_))
    ));
    let p = Proof::new(vec![vec![1], vec![2]], vec![LEFT, RIGHT]).unwrap();
    assert_eq!(p.len(), 2);
    assert_eq!(p.iter().collect::<Vec<_>>(), vec![(&[1u8][..], 0), (&[2u8][..], 1)]);
}

#[test]
fn test_compare() {
    let p = Proof::new(vec![vec![1], vec![2], vec![3]], vec![1, 1, 0]).unwrap();
    assert!(p.compare(&p.clone()).is_ok());

    let hash = Proof::new(vec![vec![1], vec![9], vec![3]], vec![1, 1, 0]).unwrap();
    match p.compare(&hash) {
        Err(Error::ProofMismatch { index: 1, kind: Mismatch::Hash }) => {}
        other => panic!("unexpected {:?}", other),
    }

    let dir = Proof::new(vec![vec![1], vec![2], vec![3]], vec![1, 1, 1]).unwrap();
    match p.compare(&dir) {
        Err(Error::ProofMismatch { index: 2, kind: Mismatch::Direction }) => {}
        other => panic!("unexpected {:?}", other),
    }

    let short = Proof::new(vec![vec![1], vec![2]], vec![1, 1]).unwrap();
    match p.compare(&short) {
        Err(Error::ProofMismatch { index: 2, kind: Mismatch::Length }) => {}
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(
        short.compare(&p).unwrap_err().to_string(),
        "proof mismatch at 2 for the length"
    );
}

#[test]
fn test_wrong_data() {
    use crate::merkle::MerkleTree;

    let data = blocks(&["Hello", "Hi", "Hey", "Hola"]);
    let tree = MerkleTree::new(&data, sha256).unwrap();
    let p = tree.gen_proof(b"Hi").unwrap();
    assert!(tree.verify(b"Hi", &p).unwrap());
    assert!(!tree.verify(b"Hello", &p).unwrap());
    assert!(!tree.verify(b"Hi!", &p).unwrap());
}
