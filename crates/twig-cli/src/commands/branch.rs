use anyhow::{bail, Result};
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct BranchArgs {
    /// Branch to create at the current commit; lists branches when omitted
    name: Option<String>,
}

pub fn run(args: &BranchArgs) -> Result<i32> {
    let repo = open_repo()?;
    let refs = repo.refs();

    let name = match &args.name {
        Some(name) => name,
        None => {
            let branches = refs.list_branches()?;
            if branches.is_empty() {
                eprintln!("No branches yet");
                return Ok(0);
            }
            let current = refs.current_branch()?;
            for branch in branches {
                if Some(&branch) == current.as_ref() {
                    println!("* {branch}");
                } else {
                    println!("  {branch}");
                }
            }
            return Ok(0);
        }
    };

    if refs.branch_exists(name) {
        bail!("branch '{name}' already exists");
    }
    let head = match refs.head_commit()? {
        Some(oid) => oid,
        None => bail!("no commits yet; cannot create a branch"),
    };

    refs.write_branch(name, &head)?;
    println!("Created branch '{name}' at {}", head.short());
    Ok(0)
}
