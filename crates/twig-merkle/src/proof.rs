//! Inclusion proofs.
//!
//! A proof for a leaf is the list of digests of every *sibling* node at the
//! level where the leaf was found, not a balanced binary authentication
//! path. Verification folds the leaf digest with each proof entry in turn:
//! the pair's hex renderings are ordered lexicographically, concatenated,
//! and hashed.
//!
//! This composition rule is intentionally different from (and weaker than)
//! the directory-hash rule used for composite digests. Downstream behavior
//! depends on this exact scheme; do not "repair" it to match the composite
//! rule.

use twig_hash::{Hasher, ObjectId};

use crate::MerkleNode;

/// Collect the inclusion proof for the leaf at `target_path`.
///
/// Depth-first search; returns `None` when no leaf with that path exists in
/// the tree.
pub fn build_proof(root: &MerkleNode, target_path: &str) -> Option<Vec<ObjectId>> {
    let mut proof = Vec::new();
    search(root, target_path, &mut proof).then_some(proof)
}

fn search(node: &MerkleNode, target_path: &str, proof: &mut Vec<ObjectId>) -> bool {
    if node.is_leaf() {
        return node.path() == target_path;
    }
    for (i, child) in node.children().iter().enumerate() {
        if search(child, target_path, proof) {
            for (j, sibling) in node.children().iter().enumerate() {
                if i != j {
                    proof.push(sibling.digest());
                }
            }
            return true;
        }
    }
    false
}

/// Fold a leaf digest through a proof and compare against the expected
/// root digest.
pub fn verify_proof(leaf: ObjectId, proof: &[ObjectId], root: ObjectId) -> bool {
    let mut current = leaf.to_hex();
    for sibling in proof {
        current = fold_pair(&current, &sibling.to_hex());
    }
    current == root.to_hex()
}

/// One fold step: order the pair lexicographically, hash the concatenation.
fn fold_pair(a: &str, b: &str) -> String {
    let mut hasher = Hasher::new();
    if a < b {
        hasher.update(a.as_bytes());
        hasher.update(b.as_bytes());
    } else {
        hasher.update(b.as_bytes());
        hasher.update(a.as_bytes());
    }
    hasher.finalize().to_hex()
}
