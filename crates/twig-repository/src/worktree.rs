//! Working-tree enumeration and snapshot materialization.

use std::fs;

use walkdir::WalkDir;

use twig_index::{Index, IgnoreList};
use twig_snapshot::{Snapshot, SnapshotReader};

use crate::{RepoError, Repository, TWIG_DIR};

impl Repository {
    /// Enumerate working-tree files, ignore-filtered, as sorted
    /// work-tree-relative paths.
    pub fn list_files(&self) -> Result<Vec<String>, RepoError> {
        let ignore = IgnoreList::load(self.work_tree())?;
        let mut files = Vec::new();

        let walker = WalkDir::new(self.work_tree())
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != TWIG_DIR);

        for entry in walker {
            let entry = entry.map_err(|e| RepoError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(self.work_tree())
                .expect("walked path is under the work tree");
            let rel = rel
                .to_str()
                .ok_or_else(|| RepoError::NonUtf8Path(entry.path().to_path_buf()))?
                .replace(std::path::MAIN_SEPARATOR, "/");
            if !ignore.is_ignored(&rel) {
                files.push(rel);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Replace tracked working-tree content with a snapshot.
    ///
    /// Removes every path the given staging state tracks, then writes each
    /// of the snapshot's blobs out, creating parent directories as needed.
    /// Untracked files are left alone.
    pub fn checkout_snapshot(
        &self,
        snapshot: &Snapshot,
        stale: &Index,
    ) -> Result<(), RepoError> {
        for (path, _) in stale.iter() {
            let full = self.work_tree().join(path);
            if full.exists() {
                fs::remove_file(&full)?;
            }
        }

        let store = self.store();
        let reader = SnapshotReader::new(&store);
        for (path, oid) in snapshot {
            let content = reader.read_blob(oid)?;
            let dest = self.work_tree().join(path);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(dest, content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;
    use twig_object::{Blob, FileMode, Object};

    #[test]
    fn list_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        let (repo, _) = Repository::init(dir.path()).unwrap();

        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), b"code\n").unwrap();
        fs::write(dir.path().join("readme.md"), b"docs\n").unwrap();
        fs::write(dir.path().join("scratch.tmp"), b"junk\n").unwrap();
        fs::write(dir.path().join(".twigignore"), "scratch.tmp\n").unwrap();

        let files = repo.list_files().unwrap();
        assert_eq!(files, vec![".twigignore", "readme.md", "src/lib.rs"]);
    }

    #[test]
    fn control_dir_never_listed() {
        let dir = TempDir::new().unwrap();
        let (repo, _) = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), b"x\n").unwrap();

        let files = repo.list_files().unwrap();
        assert!(files.iter().all(|f| !f.starts_with(".twig/")));
        assert_eq!(files, vec!["a.txt"]);
    }

    #[test]
    fn checkout_replaces_tracked_files() {
        let dir = TempDir::new().unwrap();
        let (repo, _) = Repository::init(dir.path()).unwrap();
        let store = repo.store();

        // Current state: old.txt tracked and on disk.
        fs::write(dir.path().join("old.txt"), b"old\n").unwrap();
        let old_blob = store
            .write(&Object::Blob(Blob::from_bytes(b"old\n")))
            .unwrap();
        let mut stale = Index::default();
        stale.add("old.txt", FileMode::Regular, old_blob);

        // Target snapshot: nested/new.txt only.
        let new_blob = store
            .write(&Object::Blob(Blob::from_bytes(b"new\n")))
            .unwrap();
        let mut snapshot = BTreeMap::new();
        snapshot.insert("nested/new.txt".to_string(), new_blob);

        repo.checkout_snapshot(&snapshot, &stale).unwrap();

        assert!(!dir.path().join("old.txt").exists());
        assert_eq!(
            fs::read(dir.path().join("nested/new.txt")).unwrap(),
            b"new\n"
        );
    }
}
