//! Content-addressed object storage.
//!
//! Each object lives at `objects/XX/YYYY...` where `XX` is the first two hex
//! characters of its digest and `YYYY...` the remaining 38. The file holds
//! the encoded `"<kind> <byteLength>\0<payload>"` bytes verbatim, with no
//! compression and no trailer. Writing is idempotent: identical content maps to
//! the same digest and is stored exactly once.

mod read;
mod write;

use std::path::{Path, PathBuf};

use twig_hash::ObjectId;

/// Interface to the sharded object directory.
pub struct ObjectStore {
    objects_dir: PathBuf,
}

impl ObjectStore {
    /// Open the store rooted at the given objects directory.
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    /// The objects directory this store reads and writes.
    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// The file path an object with this digest is stored at.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.store_path())
    }
}

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    #[error("digest mismatch for {oid}: stored bytes hash to {actual}")]
    DigestMismatch { oid: ObjectId, actual: ObjectId },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("corrupt object {oid}: {source}")]
    Corrupt {
        oid: ObjectId,
        #[source]
        source: twig_object::ObjectError,
    },
}
