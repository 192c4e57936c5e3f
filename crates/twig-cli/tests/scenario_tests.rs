//! End-to-end workflows driven through the compiled binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn twig(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_twig"))
        .args(args)
        .current_dir(dir)
        .env("TWIG_AUTHOR_NAME", "E2E")
        .env("TWIG_AUTHOR_EMAIL", "e2e@example.com")
        .output()
        .expect("failed to spawn twig")
}

fn twig_ok(dir: &Path, args: &[&str]) -> String {
    let out = twig(dir, args);
    assert!(
        out.status.success(),
        "`twig {}` failed\nstdout: {}\nstderr: {}",
        args.join(" "),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr),
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn count_objects(dir: &Path) -> usize {
    let objects = dir.join(".twig/objects");
    let mut n = 0;
    for shard in fs::read_dir(objects).unwrap() {
        let shard = shard.unwrap();
        if shard.file_type().unwrap().is_dir() {
            n += fs::read_dir(shard.path()).unwrap().count();
        }
    }
    n
}

#[test]
fn dedup_branch_and_diff_scenario() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    twig_ok(root, &["init"]);

    // Writing the same content twice stores exactly one blob.
    fs::write(root.join("greeting.txt"), "hello\n").unwrap();
    twig_ok(root, &["add", "greeting.txt"]);
    twig_ok(root, &["add", "greeting.txt"]);
    assert_eq!(count_objects(root), 1);

    let hash_out = twig_ok(root, &["hash-object", "greeting.txt"]);
    assert_eq!(hash_out.trim(), "ce013625030ba8dba906f756967f9e9ca394464a");

    // Commit on main, fork feature at the same commit.
    twig_ok(root, &["commit", "-m", "initial"]);
    twig_ok(root, &["branch", "feature"]);

    let compare = twig_ok(root, &["compare-branches", "main", "feature"]);
    assert!(compare.contains("identical"), "{compare}");

    // Modify only on feature.
    twig_ok(root, &["switch", "feature"]);
    fs::write(root.join("greeting.txt"), "hello, world\n").unwrap();
    twig_ok(root, &["add", "greeting.txt"]);
    twig_ok(root, &["commit", "-m", "tweak greeting"]);

    let compare = twig_ok(root, &["compare-branches", "main", "feature"]);
    assert!(compare.contains("Branches differ"), "{compare}");
    assert!(compare.contains("M greeting.txt (modified)"), "{compare}");
    assert!(!compare.contains("only in"), "{compare}");
}

#[test]
fn clean_merge_creates_merge_commit() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    twig_ok(root, &["init"]);
    fs::write(root.join("base.txt"), "base\n").unwrap();
    twig_ok(root, &["add", "base.txt"]);
    twig_ok(root, &["commit", "-m", "base"]);
    twig_ok(root, &["branch", "feature"]);

    // main gains one file, feature gains another.
    fs::write(root.join("main_only.txt"), "m\n").unwrap();
    twig_ok(root, &["add", "main_only.txt"]);
    twig_ok(root, &["commit", "-m", "main work"]);

    twig_ok(root, &["switch", "feature"]);
    fs::write(root.join("feature_only.txt"), "f\n").unwrap();
    twig_ok(root, &["add", "feature_only.txt"]);
    twig_ok(root, &["commit", "-m", "feature work"]);

    twig_ok(root, &["switch", "main"]);
    let merge_out = twig_ok(root, &["merge", "feature"]);
    assert!(merge_out.contains("Merge successful!"), "{merge_out}");

    // Both sides' files are present in the working tree afterward.
    assert_eq!(fs::read(root.join("main_only.txt")).unwrap(), b"m\n");
    assert_eq!(fs::read(root.join("feature_only.txt")).unwrap(), b"f\n");

    // The history now ends in a two-parent commit.
    let log = twig_ok(root, &["log"]);
    assert!(log.contains("Merge branch 'feature' into main"), "{log}");

    // And the whole chain verifies.
    let verify = twig_ok(root, &["verify-integrity"]);
    assert!(verify.contains("Integrity OK"), "{verify}");
}

#[test]
fn conflicting_merge_reports_and_marks() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    twig_ok(root, &["init"]);
    fs::write(root.join("file.txt"), "base\n").unwrap();
    twig_ok(root, &["add", "file.txt"]);
    twig_ok(root, &["commit", "-m", "base"]);
    twig_ok(root, &["branch", "feature"]);

    fs::write(root.join("file.txt"), "main version\n").unwrap();
    twig_ok(root, &["add", "file.txt"]);
    twig_ok(root, &["commit", "-m", "main edit"]);

    twig_ok(root, &["switch", "feature"]);
    fs::write(root.join("file.txt"), "feature version\n").unwrap();
    twig_ok(root, &["add", "file.txt"]);
    twig_ok(root, &["commit", "-m", "feature edit"]);

    twig_ok(root, &["switch", "main"]);
    let out = twig(root, &["merge", "feature"]);
    assert_eq!(out.status.code(), Some(1), "conflicted merge exits 1");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("fix conflicts"), "{stdout}");
    assert!(stdout.contains("file.txt"), "{stdout}");

    let conflicted = fs::read_to_string(root.join("file.txt")).unwrap();
    assert_eq!(
        conflicted,
        "<<<<<<< main\nmain version\n=======\nfeature version\n>>>>>>> feature\n"
    );
}

#[test]
fn verify_integrity_names_tampered_object() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    twig_ok(root, &["init"]);
    fs::write(root.join("data.txt"), "important\n").unwrap();
    twig_ok(root, &["add", "data.txt"]);
    twig_ok(root, &["commit", "-m", "store data"]);

    let verify = twig_ok(root, &["verify-integrity"]);
    assert!(verify.contains("Integrity OK"), "{verify}");

    // Flip one byte in the blob object.
    let blob_hex = twig_ok(root, &["hash-object", "data.txt"]);
    let blob_hex = blob_hex.trim();
    let object_path = root
        .join(".twig/objects")
        .join(&blob_hex[..2])
        .join(&blob_hex[2..]);
    let mut bytes = fs::read(&object_path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    fs::write(&object_path, &bytes).unwrap();

    let out = twig(root, &["verify-integrity"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains(blob_hex), "must name the digest: {stderr}");
}

#[test]
fn status_sections_track_lifecycle() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    twig_ok(root, &["init"]);
    let status = twig_ok(root, &["status"]);
    assert!(status.contains("On branch main"), "{status}");

    fs::write(root.join("a.txt"), "one\n").unwrap();
    let status = twig_ok(root, &["status"]);
    assert!(status.contains("Untracked files:"), "{status}");
    assert!(status.contains("\ta.txt"), "{status}");

    twig_ok(root, &["add", "a.txt"]);
    let status = twig_ok(root, &["status"]);
    assert!(status.contains("new file:   a.txt"), "{status}");

    twig_ok(root, &["commit", "-m", "add a"]);
    fs::write(root.join("a.txt"), "changed\n").unwrap();
    let status = twig_ok(root, &["status"]);
    assert!(
        status.contains("Changes not staged for commit:\n\tmodified:   a.txt"),
        "{status}"
    );
}

#[test]
fn checkout_detaches_and_restores() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    twig_ok(root, &["init"]);
    fs::write(root.join("v.txt"), "v1\n").unwrap();
    twig_ok(root, &["add", "v.txt"]);
    twig_ok(root, &["commit", "-m", "v1"]);

    // Capture the first commit digest from the log.
    let log = twig_ok(root, &["log"]);
    let first_commit = log
        .lines()
        .next()
        .unwrap()
        .strip_prefix("commit ")
        .unwrap()
        .to_string();

    fs::write(root.join("v.txt"), "v2\n").unwrap();
    twig_ok(root, &["add", "v.txt"]);
    twig_ok(root, &["commit", "-m", "v2"]);

    let out = twig_ok(root, &["checkout", &first_commit]);
    assert!(out.contains("detached"), "{out}");
    assert_eq!(fs::read(root.join("v.txt")).unwrap(), b"v1\n");

    let out = twig_ok(root, &["checkout", "main"]);
    assert!(out.contains("Switched to branch 'main'"), "{out}");
    assert_eq!(fs::read(root.join("v.txt")).unwrap(), b"v2\n");
}

#[test]
fn stash_save_and_pop_roundtrip() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    twig_ok(root, &["init"]);
    fs::write(root.join("wip.txt"), "work in progress\n").unwrap();
    twig_ok(root, &["add", "wip.txt"]);

    let out = twig_ok(root, &["stash", "save"]);
    assert!(out.contains("Stash ID:"), "{out}");
    assert!(!root.join("wip.txt").exists());

    let out = twig_ok(root, &["stash", "pop"]);
    assert!(out.contains("Restored stash"), "{out}");
    assert_eq!(
        fs::read(root.join("wip.txt")).unwrap(),
        b"work in progress\n"
    );
}
