use anyhow::Result;

use twig_merkle::file_blob_digest;
use twig_snapshot::{Snapshot, SnapshotReader};

use super::open_repo;

pub fn run() -> Result<i32> {
    let repo = open_repo()?;
    let store = repo.store();
    let refs = repo.refs();
    let reader = SnapshotReader::new(&store);
    let index = repo.load_index()?;

    let head_commit = refs.head_commit()?;
    let head_files: Snapshot = match head_commit {
        Some(commit) => reader.commit_snapshot(&commit)?,
        None => Snapshot::new(),
    };

    match refs.current_branch()? {
        Some(branch) => println!("On branch {branch}"),
        None => match head_commit {
            Some(commit) => println!("HEAD detached at {}", commit.short()),
            None => println!("No commits yet"),
        },
    }

    println!("Changes to be committed:");
    for (path, entry) in index.iter() {
        match head_files.get(path) {
            None => println!("\tnew file:   {path}"),
            Some(head_oid) if *head_oid != entry.oid => println!("\tmodified:   {path}"),
            Some(_) => {}
        }
    }
    for path in head_files.keys() {
        if !index.contains(path) {
            println!("\tdeleted:    {path}");
        }
    }

    println!();
    println!("Changes not staged for commit:");
    let work_files = repo.list_files()?;
    for path in &work_files {
        if let Some(entry) = index.get(path) {
            if file_blob_digest(&repo.work_tree().join(path))? != entry.oid {
                println!("\tmodified:   {path}");
            }
        }
    }

    println!();
    println!("Untracked files:");
    for path in &work_files {
        if !index.contains(path) {
            println!("\t{path}");
        }
    }

    Ok(0)
}
