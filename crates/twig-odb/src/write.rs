use std::fs;
use std::io::Write;
use std::path::Path;

use twig_hash::{Hasher, ObjectId};
use twig_object::{header, Object, ObjectKind};

use crate::{ObjectStore, StoreError};

impl ObjectStore {
    /// Write an object. Returns its digest.
    ///
    /// No-op if the object already exists (content deduplication).
    pub fn write(&self, obj: &Object) -> Result<ObjectId, StoreError> {
        self.write_encoded(&obj.encode())
    }

    /// Encode a payload with the given kind and write it. Returns the digest.
    pub fn write_payload(
        &self,
        kind: ObjectKind,
        payload: &[u8],
    ) -> Result<ObjectId, StoreError> {
        self.write_encoded(&header::encode(kind, payload))
    }

    /// Write already-encoded object bytes verbatim. Returns the digest.
    ///
    /// The digest is the hash of the encoded bytes. When an object file
    /// already exists under that digest nothing is rewritten; otherwise the
    /// bytes go to a temp file in the objects directory and are renamed into
    /// place, so a reader never observes a torn object and concurrent
    /// writers of identical content race benignly.
    pub fn write_encoded(&self, encoded: &[u8]) -> Result<ObjectId, StoreError> {
        let oid = Hasher::digest(encoded);

        if self.contains(&oid) {
            return Ok(oid);
        }

        let final_path = self.object_path(&oid);
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = write_to_temp(self.objects_dir(), encoded)?;
        finalize_object(&tmp_path, &final_path)?;

        Ok(oid)
    }
}

/// Write the bytes to a uniquely named temp file under `objects_dir`
/// (same filesystem, so the rename into place is atomic).
fn write_to_temp(objects_dir: &Path, encoded: &[u8]) -> Result<std::path::PathBuf, StoreError> {
    fs::create_dir_all(objects_dir)?;
    let tmp_path = objects_dir.join(format!(
        "tmp_obj_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos()
    ));

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(encoded)?;
    file.sync_all()?;

    Ok(tmp_path)
}

/// Atomically move a temp file to its final destination.
///
/// If the destination already exists (another writer of the same content
/// won the race), the temp file is removed and the write counts as done.
fn finalize_object(tmp: &Path, final_path: &Path) -> Result<(), StoreError> {
    match fs::rename(tmp, final_path) {
        Ok(()) => Ok(()),
        Err(_) if final_path.exists() => {
            let _ = fs::remove_file(tmp);
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(tmp);
            Err(StoreError::Io(e))
        }
    }
}
