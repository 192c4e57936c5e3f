use anyhow::{bail, Result};
use clap::Args;

use twig_object::{Commit, Object, Tree};

use super::{open_repo, signature_now};

#[derive(Args)]
pub struct CommitArgs {
    /// Commit message
    #[arg(short = 'm', long = "message", required = true)]
    message: String,
}

pub fn run(args: &CommitArgs) -> Result<i32> {
    let repo = open_repo()?;
    let store = repo.store();
    let refs = repo.refs();
    let index = repo.load_index()?;

    if index.is_empty() {
        bail!("nothing to commit (staging area is empty)");
    }

    let snapshot = index.to_snapshot();
    let tree = store.write(&Object::Tree(Tree::from_snapshot(&snapshot)))?;

    let parents = refs.head_commit()?.into_iter().collect();

    let mut message = args.message.clone();
    if !message.ends_with('\n') {
        message.push('\n');
    }
    let commit = Commit::new(tree, parents, signature_now(), message);
    let summary = commit.summary().to_string();
    let oid = store.write(&Object::Commit(commit))?;

    refs.advance_head(&oid)?;

    let label = refs
        .current_branch()?
        .unwrap_or_else(|| "detached HEAD".into());
    println!("[{label} {}] {summary}", oid.short());
    Ok(0)
}
