use anyhow::{bail, Result};
use clap::Args;

use twig_hash::ObjectId;

use super::open_repo;
use super::switch::restore_commit;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Branch name or commit digest
    target: String,
}

pub fn run(args: &CheckoutArgs) -> Result<i32> {
    let repo = open_repo()?;
    let refs = repo.refs();

    if refs.branch_exists(&args.target) {
        let commit = refs
            .read_branch(&args.target)?
            .expect("existing branch has a tip");
        restore_commit(&repo, &commit)?;
        refs.set_head_branch(&args.target)?;
        println!("Switched to branch '{}'", args.target);
        return Ok(0);
    }

    let commit = match ObjectId::from_hex(&args.target) {
        Ok(oid) => oid,
        Err(_) => bail!("'{}' is neither a branch nor a commit digest", args.target),
    };
    restore_commit(&repo, &commit)?;
    refs.set_head_detached(&commit)?;
    println!("HEAD is now at {} (detached)", commit.short());
    Ok(0)
}
