use std::fs;

use twig_hash::{Hasher, ObjectId};
use twig_object::Object;

use crate::{ObjectStore, StoreError};

impl ObjectStore {
    /// Check whether an object exists under this digest.
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Read an object's encoded bytes verbatim.
    ///
    /// Returns `Ok(None)` when no object is stored under the digest.
    pub fn read_encoded(&self, oid: &ObjectId) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.object_path(oid)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Read and decode an object.
    ///
    /// Returns `Ok(None)` when absent; decoding failures are
    /// [`StoreError::Corrupt`].
    pub fn read(&self, oid: &ObjectId) -> Result<Option<Object>, StoreError> {
        match self.read_encoded(oid)? {
            Some(bytes) => Object::decode(&bytes)
                .map(Some)
                .map_err(|source| StoreError::Corrupt { oid: *oid, source }),
            None => Ok(None),
        }
    }

    /// Read an object, failing with [`StoreError::NotFound`] when absent.
    pub fn require(&self, oid: &ObjectId) -> Result<Object, StoreError> {
        self.read(oid)?.ok_or(StoreError::NotFound(*oid))
    }

    /// Read an object and verify the stored bytes still hash to the digest
    /// they are stored under. A mismatch means on-disk tampering or
    /// corruption.
    pub fn read_verified(&self, oid: &ObjectId) -> Result<Option<Object>, StoreError> {
        let bytes = match self.read_encoded(oid)? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };

        let actual = Hasher::digest(&bytes);
        if actual != *oid {
            return Err(StoreError::DigestMismatch { oid: *oid, actual });
        }

        Object::decode(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { oid: *oid, source })
    }
}
