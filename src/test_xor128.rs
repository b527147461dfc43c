#![cfg(test)]

use crate::hash::Algorithm;
use crate::merkle::MerkleTree;
use crate::test_common::{SIZE, XOR128};

#[test]
fn test_hasher_simple() {
    let h = XOR128::new();
    assert_eq!(
        hex::encode(h.hash(b"1234567812345678").unwrap()),
        "31323334353637383132333435363738"
    );
    assert_eq!(
        hex::encode(h.hash(b"12345678123456781234567812345678").unwrap()),
        "00000000000000000000000000000000"
    );
    assert_eq!(h.hash(b"").unwrap(), [0u8; SIZE]);
}

#[test]
fn test_st() {
    let x = [String::from("ars"), String::from("zxc")];
    let mt = MerkleTree::new(&x, XOR128::new()).unwrap();
    assert_eq!(mt.leafs(), 2);
    assert_eq!(mt.len(), 3);
    assert_eq!(
        mt.leaves()[0].digest(),
        [97, 114, 115, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    );
    assert_eq!(
        mt.leaves()[1].digest(),
        [122, 120, 99, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    );
    // 16 byte digests fold onto each other
    assert_eq!(
        mt.root(),
        [97 ^ 122, 114 ^ 120, 115 ^ 99, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn test_weak_hasher_still_validates() {
    let x: Vec<String> = (0..11).map(|i| format!("item-{:02}", i)).collect();
    let mt = MerkleTree::new(&x, XOR128::new()).unwrap();

    for item in &x {
        let p = mt.gen_proof(item.as_bytes()).unwrap();
        assert!(mt.verify(item.as_bytes(), &p).unwrap());
    }

    // the padded pair hashes to zero under xor folding
    let odd = MerkleTree::new(["a", "b", "c"], XOR128::new()).unwrap();
    assert_eq!(odd.node(5).unwrap().digest(), [0u8; SIZE]);
}
