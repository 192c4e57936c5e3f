//! Structured views over stored trees and commits.
//!
//! A [`SnapshotReader`] decodes tree objects into ordered entry lists or
//! flattened path→digest snapshots, and commit objects into [`Commit`]
//! views. It owns no state beyond a borrow of the object store; every call
//! reads from disk.

use std::collections::BTreeMap;

use twig_hash::ObjectId;
use twig_object::{Commit, Object, Tree, TreeEntry};
use twig_odb::{ObjectStore, StoreError};

/// A flattened snapshot: tracked path → blob digest.
pub type Snapshot = BTreeMap<String, ObjectId>;

/// Errors from snapshot reads.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    #[error("object {oid} is a {actual}, expected {expected}")]
    UnexpectedKind {
        oid: ObjectId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("commit {0} has no tree")]
    MissingTree(ObjectId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read-only decoder for stored snapshot structure.
pub struct SnapshotReader<'a> {
    store: &'a ObjectStore,
}

impl<'a> SnapshotReader<'a> {
    pub fn new(store: &'a ObjectStore) -> Self {
        Self { store }
    }

    /// Read a tree object as its ordered entry sequence.
    pub fn read_tree(&self, oid: &ObjectId) -> Result<Vec<TreeEntry>, SnapshotError> {
        Ok(self.tree(oid)?.entries)
    }

    /// Read a tree object as a path→blobDigest mapping.
    pub fn read_tree_map(&self, oid: &ObjectId) -> Result<Snapshot, SnapshotError> {
        Ok(self.tree(oid)?.to_map())
    }

    /// Read a commit object into its structured view.
    pub fn read_commit(&self, oid: &ObjectId) -> Result<Commit, SnapshotError> {
        match self.store.require(oid)? {
            Object::Commit(commit) => Ok(commit),
            other => Err(unexpected(oid, "commit", &other)),
        }
    }

    /// Read a blob's raw content.
    pub fn read_blob(&self, oid: &ObjectId) -> Result<Vec<u8>, SnapshotError> {
        match self.store.require(oid)? {
            Object::Blob(blob) => Ok(blob.data),
            other => Err(unexpected(oid, "blob", &other)),
        }
    }

    /// The snapshot a commit captures: its tree, flattened.
    ///
    /// A commit whose stored bytes carried no `tree` header is invalid and
    /// surfaces as [`SnapshotError::MissingTree`].
    pub fn commit_snapshot(&self, commit_oid: &ObjectId) -> Result<Snapshot, SnapshotError> {
        let commit = self.read_commit(commit_oid)?;
        let tree = commit
            .tree
            .ok_or(SnapshotError::MissingTree(*commit_oid))?;
        self.read_tree_map(&tree)
    }

    fn tree(&self, oid: &ObjectId) -> Result<Tree, SnapshotError> {
        match self.store.require(oid)? {
            Object::Tree(tree) => Ok(tree),
            other => Err(unexpected(oid, "tree", &other)),
        }
    }
}

fn unexpected(oid: &ObjectId, expected: &'static str, got: &Object) -> SnapshotError {
    SnapshotError::UnexpectedKind {
        oid: *oid,
        expected,
        actual: got.kind().as_str(),
    }
}
