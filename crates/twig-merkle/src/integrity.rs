//! Whole-repository integrity verification.
//!
//! Walks the first-parent chain from a head commit. For every commit the
//! walk re-hashes the stored commit bytes, the referenced tree's bytes, and
//! every referenced blob's bytes against the digests they are stored under.
//! The first mismatch or missing object aborts the walk with an error
//! naming the offending digest.

use std::collections::HashSet;

use twig_hash::{Hasher, ObjectId};
use twig_object::{Object, Tree};
use twig_odb::ObjectStore;

use crate::MerkleError;

/// Outcome of a successful integrity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntegrityReport {
    /// Commits on the verified chain.
    pub commits: usize,
    /// Distinct objects verified (commits, trees, and blobs).
    pub objects: usize,
}

/// Verify every object reachable along the first-parent chain from `head`.
///
/// An empty chain (`head` is `None`) trivially succeeds with zero counts.
pub fn integrity_check(
    store: &ObjectStore,
    head: Option<ObjectId>,
) -> Result<IntegrityReport, MerkleError> {
    let mut report = IntegrityReport::default();
    let mut verified: HashSet<ObjectId> = HashSet::new();
    let mut walked: HashSet<ObjectId> = HashSet::new();

    let mut cursor = head;
    while let Some(commit_oid) = cursor {
        // The graph is acyclic by construction, but a corrupted store must
        // not hang the walk.
        if !walked.insert(commit_oid) {
            break;
        }

        let commit_bytes = check_object(store, &commit_oid, &mut verified, &mut report)?;
        let commit = match Object::decode(&commit_bytes) {
            Ok(Object::Commit(c)) => c,
            Ok(other) => {
                return Err(MerkleError::CorruptObject {
                    oid: commit_oid,
                    reason: format!("expected a commit, found a {}", other.kind()),
                })
            }
            Err(e) => {
                return Err(MerkleError::CorruptObject {
                    oid: commit_oid,
                    reason: e.to_string(),
                })
            }
        };
        report.commits += 1;

        let tree_oid = commit.tree.ok_or(MerkleError::CorruptObject {
            oid: commit_oid,
            reason: "commit has no tree".into(),
        })?;

        let tree_bytes = check_object(store, &tree_oid, &mut verified, &mut report)?;
        let tree = match Object::decode(&tree_bytes) {
            Ok(Object::Tree(t)) => t,
            Ok(other) => {
                return Err(MerkleError::CorruptObject {
                    oid: tree_oid,
                    reason: format!("expected a tree, found a {}", other.kind()),
                })
            }
            Err(e) => {
                return Err(MerkleError::CorruptObject {
                    oid: tree_oid,
                    reason: e.to_string(),
                })
            }
        };

        check_blobs(store, &tree, &mut verified, &mut report)?;

        cursor = commit.first_parent();
    }

    Ok(report)
}

fn check_blobs(
    store: &ObjectStore,
    tree: &Tree,
    verified: &mut HashSet<ObjectId>,
    report: &mut IntegrityReport,
) -> Result<(), MerkleError> {
    for entry in &tree.entries {
        if verified.contains(&entry.oid) {
            continue;
        }
        check_object(store, &entry.oid, verified, report)?;
    }
    Ok(())
}

/// Read an object's stored bytes and re-hash them against the storage key.
fn check_object(
    store: &ObjectStore,
    oid: &ObjectId,
    verified: &mut HashSet<ObjectId>,
    report: &mut IntegrityReport,
) -> Result<Vec<u8>, MerkleError> {
    let bytes = store
        .read_encoded(oid)?
        .ok_or(MerkleError::MissingObject(*oid))?;

    let actual = Hasher::digest(&bytes);
    if actual != *oid {
        return Err(MerkleError::DigestMismatch { oid: *oid, actual });
    }

    if verified.insert(*oid) {
        report.objects += 1;
    }
    Ok(bytes)
}
