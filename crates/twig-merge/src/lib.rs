//! Merge engine.
//!
//! Merges two commit tips by unioning their snapshots. Paths present on one
//! side are taken as-is; paths present on both sides with equal blob
//! digests are taken silently; paths that differ on both sides are
//! conflicts. A conflict is an expected, user-facing outcome, not an error:
//! the engine materializes both sides between boundary markers in the
//! working tree, stores that marked body as a new blob, and records it in
//! the merged snapshot so the unresolved state is what gets staged.
//!
//! Only when zero conflicts were found does the engine create objects
//! beyond blobs: the merged Tree and a Commit carrying *both* parent
//! digests. Advancing the branch ref is the caller's job.

mod conflict;

pub use conflict::conflict_body;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use twig_hash::ObjectId;
use twig_object::{Commit, FileMode, Object, ObjectKind, Signature, Tree};
use twig_odb::{ObjectStore, StoreError};
use twig_snapshot::{SnapshotError, SnapshotReader};

/// Errors from merge operations. Conflicts are not among them; they are a
/// normal [`MergeOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("commit {0} has no tree")]
    MissingTree(ObjectId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Labels written on the conflict boundary markers.
#[derive(Debug, Clone)]
pub struct MergeLabels {
    /// Label for the current side (typically the current branch name).
    pub current: String,
    /// Label for the incoming side (typically the merged branch name).
    pub incoming: String,
}

/// Result of a merge: the merged snapshot to stage, the conflicting paths,
/// and (for a clean merge only) the new two-parent commit.
#[derive(Debug)]
pub struct MergeOutcome {
    /// Path → (mode, blob digest) for every path in the union. Conflicted
    /// paths map to the digest of their marker-carrying blob.
    pub snapshot: BTreeMap<String, (FileMode, ObjectId)>,
    /// Paths that need manual resolution, in path order.
    pub conflicts: Vec<String>,
    /// The merge commit, present only when `conflicts` is empty.
    pub commit: Option<ObjectId>,
}

impl MergeOutcome {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Two-tip merge driver bound to a store and a working tree.
pub struct Merger<'a> {
    store: &'a ObjectStore,
    work_tree: PathBuf,
}

impl<'a> Merger<'a> {
    pub fn new(store: &'a ObjectStore, work_tree: impl AsRef<Path>) -> Self {
        Self {
            store,
            work_tree: work_tree.as_ref().to_path_buf(),
        }
    }

    /// Merge `incoming_tip` into `current_tip`.
    pub fn merge(
        &self,
        current_tip: &ObjectId,
        incoming_tip: &ObjectId,
        labels: &MergeLabels,
        signature: Signature,
        message: &str,
    ) -> Result<MergeOutcome, MergeError> {
        let reader = SnapshotReader::new(self.store);
        let current = self.load_side(&reader, current_tip)?;
        let incoming = self.load_side(&reader, incoming_tip)?;

        let mut snapshot = BTreeMap::new();
        let mut conflicts = Vec::new();

        let mut paths: Vec<&String> = current.keys().chain(incoming.keys()).collect();
        paths.sort();
        paths.dedup();

        for path in paths {
            match (current.get(path), incoming.get(path)) {
                (Some(&(mode, ours)), Some(&(_, theirs))) if ours == theirs => {
                    snapshot.insert(path.clone(), (mode, ours));
                }
                (Some(&(mode, ours)), Some(&(_, theirs))) => {
                    let marked = self.materialize_conflict(
                        &reader, path, &ours, &theirs, labels,
                    )?;
                    snapshot.insert(path.clone(), (mode, marked));
                    conflicts.push(path.clone());
                }
                (Some(&(mode, ours)), None) => {
                    snapshot.insert(path.clone(), (mode, ours));
                    let dest = self.work_tree.join(path);
                    if !dest.exists() {
                        self.write_work_file(path, &reader.read_blob(&ours)?)?;
                    }
                }
                (None, Some(&(mode, theirs))) => {
                    snapshot.insert(path.clone(), (mode, theirs));
                    self.write_work_file(path, &reader.read_blob(&theirs)?)?;
                }
                (None, None) => unreachable!("path came from one of the two snapshots"),
            }
        }

        let commit = if conflicts.is_empty() {
            let tree = self
                .store
                .write(&Object::Tree(Tree::from_snapshot(&snapshot)))?;
            let commit = Commit::new(
                tree,
                vec![*current_tip, *incoming_tip],
                signature,
                message,
            );
            Some(self.store.write(&Object::Commit(commit))?)
        } else {
            None
        };

        Ok(MergeOutcome {
            snapshot,
            conflicts,
            commit,
        })
    }

    /// Load one tip's snapshot with modes preserved from its tree.
    fn load_side(
        &self,
        reader: &SnapshotReader<'_>,
        tip: &ObjectId,
    ) -> Result<BTreeMap<String, (FileMode, ObjectId)>, MergeError> {
        let commit = reader.read_commit(tip)?;
        let tree = commit.tree.ok_or(MergeError::MissingTree(*tip))?;
        Ok(reader
            .read_tree(&tree)?
            .into_iter()
            .map(|e| (e.path, (e.mode, e.oid)))
            .collect())
    }

    /// Write the marker-carrying body for a conflicted path into the work
    /// tree and store it as a new blob. Returns the new blob's digest.
    fn materialize_conflict(
        &self,
        reader: &SnapshotReader<'_>,
        path: &str,
        ours: &ObjectId,
        theirs: &ObjectId,
        labels: &MergeLabels,
    ) -> Result<ObjectId, MergeError> {
        let body = conflict_body(
            &reader.read_blob(ours)?,
            &reader.read_blob(theirs)?,
            &labels.current,
            &labels.incoming,
        );
        self.write_work_file(path, &body)?;
        Ok(self.store.write_payload(ObjectKind::Blob, &body)?)
    }

    fn write_work_file(&self, path: &str, content: &[u8]) -> Result<(), MergeError> {
        let dest = self.work_tree.join(path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, content)?;
        Ok(())
    }
}
