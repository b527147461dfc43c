use crate::hash::Algorithm;
use anyhow::anyhow;
use sha2::{Digest, Sha256};
use std::cell::Cell;

pub const SIZE: usize = 0x10;

pub fn sha256(data: &[u8]) -> anyhow::Result<Vec<u8>> {
    Ok(Sha256::digest(data).to_vec())
}

pub fn failing(_data: &[u8]) -> anyhow::Result<Vec<u8>> {
    Err(anyhow!("hash backend unavailable"))
}

pub fn blocks(items: &[&str]) -> Vec<Vec<u8>> {
    items.iter().map(|s| s.as_bytes().to_vec()).collect()
}

/// Toy 128 bit xor folding hasher.
#[derive(Debug, Copy, Clone, Default)]
pub struct XOR128;

impl XOR128 {
    pub fn new() -> XOR128 {
        XOR128
    }
}

impl Algorithm for XOR128 {
    fn hash(&self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        let mut h = [0u8; SIZE];
        for (i, x) in data.iter().enumerate() {
            h[i & (SIZE - 1)] ^= *x;
        }
        Ok(h.to_vec())
    }
}

/// Renders the tree shape into the digests: leaves keep their data and
/// nodes wrap both children in parentheses.
#[derive(Debug, Copy, Clone, Default)]
pub struct Trace;

impl Algorithm for Trace {
    fn hash(&self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn node(&self, left: &[u8], right: &[u8]) -> anyhow::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(left.len() + right.len() + 2);
        buf.push(b'(');
        buf.extend_from_slice(left);
        buf.extend_from_slice(right);
        buf.push(b')');
        Ok(buf)
    }
}

pub fn trace(digest: &[u8]) -> String {
    String::from_utf8_lossy(digest).into_owned()
}

/// SHA-256 that starts failing once `budget` calls were made.
#[derive(Debug)]
pub struct FailAfter {
    budget: Cell<usize>,
}

impl FailAfter {
    pub fn new(budget: usize) -> FailAfter {
        FailAfter {
            budget: Cell::new(budget),
        }
    }

    pub fn refill(&self, budget: usize) {
        self.budget.set(budget);
    }
}

impl Algorithm for FailAfter {
    fn hash(&self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        let left = self.budget.get();
        if left == 0 {
            return Err(anyhow!("hash budget exhausted"));
        }
        self.budget.set(left - 1);
        sha256(data)
    }
}
