//! The two tree builders.
//!
//! `build_from_work_tree` descends the real file hierarchy and produces a
//! nested tree: one composite node per directory, one leaf per file. Each
//! leaf's digest is the digest of that file's *blob encoding*, so leaves
//! compare directly against object-store digests.
//!
//! `build_from_snapshot` reads a stored commit and produces a single flat
//! composite whose children are every tracked path at once. The two shapes
//! must be kept distinct; diffing across them is done at leaf-path
//! granularity, never by level.

use std::fs;
use std::path::Path;

use twig_hash::{Hasher, ObjectId};
use twig_object::{header, ObjectKind};
use twig_odb::ObjectStore;
use twig_snapshot::{SnapshotError, SnapshotReader};

use crate::{MerkleError, MerkleNode};

/// Name of the control-metadata directory, excluded from work-tree builds.
const CONTROL_DIR: &str = ".twig";

/// Build a nested Merkle tree from the live file hierarchy under `root`.
///
/// Directory entries are sorted by name before recursion, so the same
/// hierarchy always builds the same tree. Node paths are relative to
/// `root`; the root node's path is empty.
pub fn build_from_work_tree(root: &Path) -> Result<MerkleNode, MerkleError> {
    build_directory(root, "")
}

fn build_directory(dir: &Path, rel: &str) -> Result<MerkleNode, MerkleError> {
    let mut names = Vec::new();
    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry
                .file_name()
                .into_string()
                .map_err(|n| MerkleError::NonUtf8Path(dir.join(n)))?;
            if name == CONTROL_DIR {
                continue;
            }
            names.push(name);
        }
    }
    names.sort();

    let mut children = Vec::with_capacity(names.len());
    for name in names {
        let child_path = dir.join(&name);
        let child_rel = if rel.is_empty() {
            name
        } else {
            format!("{rel}/{name}")
        };
        if child_path.is_dir() {
            children.push(build_directory(&child_path, &child_rel)?);
        } else if child_path.is_file() {
            children.push(MerkleNode::leaf(child_rel, file_blob_digest(&child_path)?));
        }
        // Anything else (sockets, dangling symlinks) is not tracked.
    }

    Ok(MerkleNode::composite(rel, children))
}

/// Digest of a file's blob encoding: `"blob <len>\0<content>"`.
pub fn file_blob_digest(path: &Path) -> Result<ObjectId, MerkleError> {
    let content = fs::read(path)?;
    let mut hasher = Hasher::new();
    hasher.update(&header::write_header(ObjectKind::Blob, content.len()));
    hasher.update(&content);
    Ok(hasher.finalize())
}

/// Build a flat Merkle view of a stored tree object: one leaf per tracked
/// path, all direct children of a single composite root.
pub fn build_from_tree(store: &ObjectStore, tree: &ObjectId) -> Result<MerkleNode, MerkleError> {
    let reader = SnapshotReader::new(store);
    let entries = reader.read_tree(tree)?;
    let children = entries
        .into_iter()
        .map(|e| MerkleNode::leaf(e.path, e.oid))
        .collect();
    Ok(MerkleNode::composite("", children))
}

/// Build the flat Merkle view of the snapshot a commit captures.
pub fn build_from_snapshot(
    store: &ObjectStore,
    commit: &ObjectId,
) -> Result<MerkleNode, MerkleError> {
    let reader = SnapshotReader::new(store);
    let parsed = reader.read_commit(commit)?;
    let tree = parsed
        .tree
        .ok_or(SnapshotError::MissingTree(*commit))?;
    build_from_tree(store, &tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;
    use twig_object::{Blob, Commit, FileMode, Object, Signature, Tree};

    fn sig() -> Signature {
        Signature {
            name: "Test".into(),
            email: "test@example.com".into(),
            when: 1_700_000_000,
            tz: "+0000".into(),
        }
    }

    #[test]
    fn work_tree_build_is_nested_and_self_consistent() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join(".twig/objects")).unwrap();
        fs::write(dir.path().join("readme.md"), b"docs\n").unwrap();
        fs::write(dir.path().join("src/lib.rs"), b"fn main() {}\n").unwrap();

        let root = build_from_work_tree(dir.path()).unwrap();

        // Control dir excluded; children sorted by name.
        let names: Vec<_> = root.children().iter().map(|c| c.path()).collect();
        assert_eq!(names, ["readme.md", "src"]);

        let src = &root.children()[1];
        assert!(!src.is_leaf());
        assert_eq!(src.children().len(), 1);
        assert_eq!(src.children()[0].path(), "src/lib.rs");

        // Self-consistency: immediately after building, verify succeeds.
        assert!(root.verify(&root.digest()));
    }

    #[test]
    fn work_tree_leaf_matches_store_digest() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"hello\n").unwrap();

        let store = ObjectStore::open(dir.path().join(".twig/objects"));
        let stored = store
            .write(&Object::Blob(Blob::from_bytes(b"hello\n")))
            .unwrap();

        let root = build_from_work_tree(dir.path()).unwrap();
        assert_eq!(root.children()[0].digest(), stored);
    }

    #[test]
    fn work_tree_build_is_deterministic() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), b"two\n").unwrap();
        fs::write(dir.path().join("a.txt"), b"one\n").unwrap();

        let first = build_from_work_tree(dir.path()).unwrap();
        let second = build_from_work_tree(dir.path()).unwrap();
        assert_eq!(first.digest(), second.digest());
    }

    #[test]
    fn snapshot_build_is_one_flat_level() {
        let dir = TempDir::new().unwrap();
        let store = ObjectStore::open(dir.path().join("objects"));

        let blob = store
            .write(&Object::Blob(Blob::from_bytes(b"hello\n")))
            .unwrap();
        let mut snap = BTreeMap::new();
        snap.insert("a.txt".to_string(), (FileMode::Regular, blob));
        snap.insert("src/lib.rs".to_string(), (FileMode::Regular, blob));
        let tree = store
            .write(&Object::Tree(Tree::from_snapshot(&snap)))
            .unwrap();
        let commit = store
            .write(&Object::Commit(Commit::new(tree, vec![], sig(), "init\n")))
            .unwrap();

        let root = build_from_snapshot(&store, &commit).unwrap();
        assert_eq!(root.children().len(), 2);
        // Nested paths stay direct children, no intermediate "src" node.
        assert!(root.children().iter().all(|c| c.is_leaf()));
        assert_eq!(root.children()[1].path(), "src/lib.rs");
        assert!(root.verify(&root.digest()));
    }

    #[test]
    fn missing_commit_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = ObjectStore::open(dir.path().join("objects"));
        let absent = ObjectId::from_hex("2222222222222222222222222222222222222222").unwrap();
        assert!(build_from_snapshot(&store, &absent).is_err());
    }
}
