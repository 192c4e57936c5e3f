use anyhow::{bail, Result};
use clap::Args;

use twig_hash::ObjectId;
use twig_merkle::{build_from_snapshot, build_from_tree, build_from_work_tree, diff, DiffStatus};

use super::open_repo;

#[derive(Args)]
pub struct DiffTreeArgs {
    /// Compare the working tree against a commit instead of two trees
    #[arg(long = "work-tree")]
    work_tree: bool,

    /// Two tree digests, or one commit digest with --work-tree
    #[arg(value_name = "digest")]
    digests: Vec<String>,
}

pub fn run(args: &DiffTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let store = repo.store();

    let (a, b) = if args.work_tree {
        let [commit] = args.digests.as_slice() else {
            bail!("--work-tree takes exactly one commit digest");
        };
        let commit = ObjectId::from_hex(commit)?;
        println!("Comparing working tree with commit {commit}");
        (
            build_from_work_tree(repo.work_tree())?,
            build_from_snapshot(&store, &commit)?,
        )
    } else {
        let [first, second] = args.digests.as_slice() else {
            bail!("expected two tree digests");
        };
        let first = ObjectId::from_hex(first)?;
        let second = ObjectId::from_hex(second)?;
        println!("Comparing tree {first} with tree {second}");
        (
            build_from_tree(&store, &first)?,
            build_from_tree(&store, &second)?,
        )
    };

    if a.digest() == b.digest() {
        println!();
        println!("Trees are identical (Merkle roots match)");
        println!("Merkle root: {}", a.digest());
        return Ok(0);
    }

    println!();
    println!("Trees differ (Merkle roots do not match)");
    println!("Tree 1 root: {}", a.digest());
    println!("Tree 2 root: {}", b.digest());
    println!();

    let changes = diff(&a, &b);
    if changes.is_empty() {
        println!("  (no leaf-level changes detected)");
    } else {
        for (path, status) in &changes {
            let letter = match status {
                DiffStatus::Added => "A",
                DiffStatus::Deleted => "D",
                DiffStatus::Modified => "M",
            };
            println!("  {letter} {path} ({status})");
        }
    }
    println!();
    println!("Total changes: {}", changes.len());
    Ok(0)
}
