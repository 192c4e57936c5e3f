//! Merkle verification layer.
//!
//! Builds comparable tree abstractions from two structurally different
//! sources (the live file hierarchy and a stored snapshot), computes
//! composite digests over them, diffs two trees, constructs and checks
//! inclusion proofs, and walks commit history to verify global integrity.
//!
//! The two builders are deliberately asymmetric: a work-tree build is a
//! true nested tree with one node per directory, while a snapshot build is
//! always a single flat level with every tracked path as a direct child.
//! Comparing across the two is only meaningful at leaf-path granularity.
//! Nodes are transient: built for one verification/diff/proof call and
//! discarded, never persisted.

mod build;
mod diff;
mod integrity;
mod node;
mod proof;

pub use build::{build_from_snapshot, build_from_tree, build_from_work_tree, file_blob_digest};
pub use diff::{diff, DiffStatus};
pub use integrity::{integrity_check, IntegrityReport};
pub use node::MerkleNode;
pub use proof::{build_proof, verify_proof};

use twig_hash::ObjectId;

/// Errors from Merkle construction and verification.
#[derive(Debug, thiserror::Error)]
pub enum MerkleError {
    #[error("missing object: {0}")]
    MissingObject(ObjectId),

    #[error("digest mismatch for {oid}: stored bytes hash to {actual}")]
    DigestMismatch { oid: ObjectId, actual: ObjectId },

    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },

    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(std::path::PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] twig_odb::StoreError),

    #[error(transparent)]
    Snapshot(#[from] twig_snapshot::SnapshotError),
}
