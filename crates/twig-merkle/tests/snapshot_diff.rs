//! Store-backed diff behavior across commits.

use std::collections::BTreeMap;

use tempfile::TempDir;
use twig_hash::ObjectId;
use twig_merkle::{build_from_snapshot, diff, DiffStatus};
use twig_object::{Blob, Commit, FileMode, Object, Signature, Tree};
use twig_odb::ObjectStore;

fn sig() -> Signature {
    Signature {
        name: "Test".into(),
        email: "test@example.com".into(),
        when: 1_700_000_000,
        tz: "+0000".into(),
    }
}

fn commit_files(store: &ObjectStore, files: &[(&str, &[u8])], parents: Vec<ObjectId>) -> ObjectId {
    let mut snap = BTreeMap::new();
    for (path, content) in files {
        let blob = store
            .write(&Object::Blob(Blob::from_bytes(*content)))
            .unwrap();
        snap.insert(path.to_string(), (FileMode::Regular, blob));
    }
    let tree = store
        .write(&Object::Tree(Tree::from_snapshot(&snap)))
        .unwrap();
    store
        .write(&Object::Commit(Commit::new(tree, parents, sig(), "c\n")))
        .unwrap()
}

#[test]
fn diff_of_a_commit_with_itself_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = ObjectStore::open(dir.path().join("objects"));
    let head = commit_files(
        &store,
        &[("a.txt", b"one\n"), ("src/lib.rs", b"code\n")],
        vec![],
    );

    let x = build_from_snapshot(&store, &head).unwrap();
    let y = build_from_snapshot(&store, &head).unwrap();
    assert_eq!(x.digest(), y.digest());
    assert!(diff(&x, &y).is_empty());
}

#[test]
fn single_edit_reports_exactly_one_modified_path() {
    let dir = TempDir::new().unwrap();
    let store = ObjectStore::open(dir.path().join("objects"));

    let main = commit_files(
        &store,
        &[("greeting.txt", b"hello\n"), ("other.txt", b"same\n")],
        vec![],
    );
    let feature = commit_files(
        &store,
        &[("greeting.txt", b"hello, world\n"), ("other.txt", b"same\n")],
        vec![main],
    );

    let changes = diff(
        &build_from_snapshot(&store, &main).unwrap(),
        &build_from_snapshot(&store, &feature).unwrap(),
    );
    assert_eq!(changes.len(), 1);
    assert_eq!(changes["greeting.txt"], DiffStatus::Modified);
}

#[test]
fn diff_is_antisymmetric_across_commits() {
    let dir = TempDir::new().unwrap();
    let store = ObjectStore::open(dir.path().join("objects"));

    let before = commit_files(
        &store,
        &[("kept.txt", b"same\n"), ("removed.txt", b"bye\n"), ("edited.txt", b"v1\n")],
        vec![],
    );
    let after = commit_files(
        &store,
        &[("kept.txt", b"same\n"), ("introduced.txt", b"hi\n"), ("edited.txt", b"v2\n")],
        vec![before],
    );

    let a = build_from_snapshot(&store, &before).unwrap();
    let b = build_from_snapshot(&store, &after).unwrap();

    let forward = diff(&a, &b);
    let backward = diff(&b, &a);

    assert_eq!(forward["removed.txt"], DiffStatus::Deleted);
    assert_eq!(backward["removed.txt"], DiffStatus::Added);
    assert_eq!(forward["introduced.txt"], DiffStatus::Added);
    assert_eq!(backward["introduced.txt"], DiffStatus::Deleted);
    assert_eq!(forward["edited.txt"], DiffStatus::Modified);
    assert_eq!(backward["edited.txt"], DiffStatus::Modified);
    assert_eq!(forward.len(), backward.len());
}

#[test]
fn root_digests_differ_iff_snapshots_differ() {
    let dir = TempDir::new().unwrap();
    let store = ObjectStore::open(dir.path().join("objects"));

    let one = commit_files(&store, &[("a.txt", b"x\n")], vec![]);
    let same = commit_files(&store, &[("a.txt", b"x\n")], vec![one]);
    let other = commit_files(&store, &[("a.txt", b"y\n")], vec![one]);

    let root_one = build_from_snapshot(&store, &one).unwrap().digest();
    let root_same = build_from_snapshot(&store, &same).unwrap().digest();
    let root_other = build_from_snapshot(&store, &other).unwrap().digest();

    assert_eq!(root_one, root_same);
    assert_ne!(root_one, root_other);
}
