use anyhow::{bail, Result};
use clap::Args;

use twig_hash::ObjectId;
use twig_repository::Repository;
use twig_snapshot::SnapshotReader;

use super::open_repo;

#[derive(Args)]
pub struct CompareBranchesArgs {
    first: String,
    second: String,
}

pub fn run(args: &CompareBranchesArgs) -> Result<i32> {
    let repo = open_repo()?;

    let first_tree = branch_tree(&repo, &args.first)?;
    let second_tree = branch_tree(&repo, &args.second)?;

    println!("Comparing branches by tree digest:");
    println!("  {}: {first_tree}", args.first);
    println!("  {}: {second_tree}", args.second);
    println!();

    if first_tree == second_tree {
        println!("Branches are identical (same content)");
        return Ok(0);
    }

    println!("Branches differ");
    println!();

    let store = repo.store();
    let reader = SnapshotReader::new(&store);
    let ours = reader.read_tree_map(&first_tree)?;
    let theirs = reader.read_tree_map(&second_tree)?;

    for (path, oid) in &ours {
        match theirs.get(path) {
            None => println!("  - {path} (only in {})", args.first),
            Some(other) if other != oid => println!("  M {path} (modified)"),
            Some(_) => {}
        }
    }
    for path in theirs.keys() {
        if !ours.contains_key(path) {
            println!("  + {path} (only in {})", args.second);
        }
    }

    Ok(0)
}

/// Resolve a branch to the tree digest its tip commit snapshots.
fn branch_tree(repo: &Repository, branch: &str) -> Result<ObjectId> {
    let tip = match repo.refs().read_branch(branch)? {
        Some(oid) => oid,
        None => bail!("branch '{branch}' not found"),
    };
    let store = repo.store();
    let commit = SnapshotReader::new(&store).read_commit(&tip)?;
    match commit.tree {
        Some(tree) => Ok(tree),
        None => bail!("commit {} has no tree", tip.short()),
    }
}
