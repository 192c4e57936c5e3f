use anyhow::{bail, Result};
use clap::Args;

use twig_hash::ObjectId;
use twig_repository::Repository;
use twig_snapshot::SnapshotReader;

use super::open_repo;

#[derive(Args)]
pub struct SwitchArgs {
    /// Branch to switch to
    name: String,
}

pub fn run(args: &SwitchArgs) -> Result<i32> {
    let repo = open_repo()?;
    let refs = repo.refs();

    let commit = match refs.read_branch(&args.name)? {
        Some(oid) => oid,
        None => bail!("branch '{}' does not exist", args.name),
    };

    restore_commit(&repo, &commit)?;
    refs.set_head_branch(&args.name)?;
    println!("Switched to branch '{}'", args.name);
    Ok(0)
}

/// Materialize a commit's snapshot into the working tree and reset the
/// staging area to match it. Shared with `checkout`.
pub(crate) fn restore_commit(repo: &Repository, commit: &ObjectId) -> Result<()> {
    let store = repo.store();
    let reader = SnapshotReader::new(&store);

    let parsed = reader.read_commit(commit)?;
    let tree = match parsed.tree {
        Some(tree) => tree,
        None => bail!("commit {} has no tree", commit.short()),
    };
    let entries = reader.read_tree(&tree)?;
    let snapshot = entries.iter().map(|e| (e.path.clone(), e.oid)).collect();

    let stale = repo.load_index()?;
    repo.checkout_snapshot(&snapshot, &stale)?;

    let mut index = stale;
    index.replace_with(entries.into_iter().map(|e| (e.path, (e.mode, e.oid))));
    repo.save_index(&index)?;
    Ok(())
}
