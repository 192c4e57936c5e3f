//! Merge behavior: unions, conflicts, and merge commits.

use std::collections::BTreeMap;
use std::fs;

use tempfile::TempDir;
use twig_hash::ObjectId;
use twig_merge::{conflict_body, MergeLabels, Merger};
use twig_object::{Blob, Commit, FileMode, Object, Signature, Tree};
use twig_odb::ObjectStore;
use twig_snapshot::SnapshotReader;

fn sig() -> Signature {
    Signature {
        name: "Test".into(),
        email: "test@example.com".into(),
        when: 1_700_000_000,
        tz: "+0000".into(),
    }
}

fn labels() -> MergeLabels {
    MergeLabels {
        current: "main".into(),
        incoming: "feature".into(),
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

struct Fixture {
    _dir: TempDir,
    store: ObjectStore,
    work_tree: std::path::PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let work_tree = dir.path().to_path_buf();
    let store = ObjectStore::open(dir.path().join(".twig/objects"));
    Fixture {
        _dir: dir,
        store,
        work_tree,
    }
}

#[test]
fn one_sided_paths_never_conflict() {
    let fx = fixture();
    let base = commit_files(&fx.store, &[("shared.txt", b"same\n")], vec![]);
    let ours = commit_files(
        &fx.store,
        &[("shared.txt", b"same\n"), ("ours.txt", b"mine\n")],
        vec![base],
    );
    let theirs = commit_files(
        &fx.store,
        &[("shared.txt", b"same\n"), ("theirs.txt", b"yours\n")],
        vec![base],
    );

    let merger = Merger::new(&fx.store, &fx.work_tree);
    let outcome = merger
        .merge(&ours, &theirs, &labels(), sig(), "Merge branch 'feature'\n")
        .unwrap();

    assert!(outcome.is_clean());
    assert_eq!(outcome.snapshot.len(), 3);
    assert!(outcome.snapshot.contains_key("ours.txt"));
    assert!(outcome.snapshot.contains_key("theirs.txt"));
    // The incoming side's file was materialized into the working tree.
    assert_eq!(
        fs::read(fx.work_tree.join("theirs.txt")).unwrap(),
        b"yours\n"
    );
}

#[test]
fn equal_content_is_taken_silently() {
    let fx = fixture();
    let ours = commit_files(&fx.store, &[("a.txt", b"agree\n")], vec![]);
    let theirs = commit_files(&fx.store, &[("a.txt", b"agree\n")], vec![]);

    let merger = Merger::new(&fx.store, &fx.work_tree);
    let outcome = merger
        .merge(&ours, &theirs, &labels(), sig(), "Merge\n")
        .unwrap();

    assert!(outcome.is_clean());
    assert_eq!(outcome.snapshot.len(), 1);
}

#[test]
fn divergent_content_produces_exactly_one_conflict() {
    let fx = fixture();
    let ours = commit_files(&fx.store, &[("file.txt", b"ours\n")], vec![]);
    let theirs = commit_files(&fx.store, &[("file.txt", b"theirs\n")], vec![]);

    let merger = Merger::new(&fx.store, &fx.work_tree);
    let outcome = merger
        .merge(&ours, &theirs, &labels(), sig(), "Merge\n")
        .unwrap();

    assert_eq!(outcome.conflicts, vec!["file.txt".to_string()]);
    assert!(outcome.commit.is_none());

    // The working tree holds both sides between distinct markers.
    let on_disk = fs::read(fx.work_tree.join("file.txt")).unwrap();
    assert_eq!(
        on_disk,
        b"<<<<<<< main\nours\n=======\ntheirs\n>>>>>>> feature\n"
    );

    // The staged entry is the digest of the marker-carrying blob, and that
    // blob is in the store.
    let expected_body = conflict_body(b"ours\n", b"theirs\n", "main", "feature");
    let (_, staged) = outcome.snapshot["file.txt"];
    let reader = SnapshotReader::new(&fx.store);
    assert_eq!(reader.read_blob(&staged).unwrap(), expected_body);
}

#[test]
fn clean_merge_creates_two_parent_commit() {
    let fx = fixture();
    let ours = commit_files(&fx.store, &[("a.txt", b"a\n")], vec![]);
    let theirs = commit_files(&fx.store, &[("b.txt", b"b\n")], vec![]);

    let merger = Merger::new(&fx.store, &fx.work_tree);
    let outcome = merger
        .merge(&ours, &theirs, &labels(), sig(), "Merge branch 'feature'\n")
        .unwrap();

    let merge_commit = outcome.commit.expect("clean merge must commit");
    let reader = SnapshotReader::new(&fx.store);
    let commit = reader.read_commit(&merge_commit).unwrap();
    assert_eq!(commit.parents, vec![ours, theirs]);

    // The merged tree is the union of both sides.
    let snapshot = reader.commit_snapshot(&merge_commit).unwrap();
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.contains_key("a.txt"));
    assert!(snapshot.contains_key("b.txt"));
}

#[test]
fn conflicted_merge_still_merges_the_rest() {
    let fx = fixture();
    let ours = commit_files(
        &fx.store,
        &[("clash.txt", b"ours\n"), ("ours_only.txt", b"keep\n")],
        vec![],
    );
    let theirs = commit_files(
        &fx.store,
        &[("clash.txt", b"theirs\n"), ("theirs_only.txt", b"add\n")],
        vec![],
    );

    let merger = Merger::new(&fx.store, &fx.work_tree);
    let outcome = merger
        .merge(&ours, &theirs, &labels(), sig(), "Merge\n")
        .unwrap();

    assert_eq!(outcome.conflicts, vec!["clash.txt".to_string()]);
    // Non-conflicting paths are staged alongside the conflict entry.
    assert_eq!(outcome.snapshot.len(), 3);
    assert!(outcome.snapshot.contains_key("ours_only.txt"));
    assert!(outcome.snapshot.contains_key("theirs_only.txt"));
}
