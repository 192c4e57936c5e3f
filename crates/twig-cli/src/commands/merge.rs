use anyhow::{bail, Result};
use clap::Args;

use twig_merge::{MergeLabels, Merger};

use super::{open_repo, signature_now};

#[derive(Args)]
pub struct MergeArgs {
    /// Branch to merge into the current branch
    name: String,
}

pub fn run(args: &MergeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let store = repo.store();
    let refs = repo.refs();

    let current_branch = match refs.current_branch()? {
        Some(branch) => branch,
        None => bail!("cannot merge in detached HEAD state"),
    };
    if args.name == current_branch {
        bail!("cannot merge branch '{current_branch}' into itself");
    }

    let current_tip = match refs.read_branch(&current_branch)? {
        Some(oid) => oid,
        None => bail!("no commits on current branch"),
    };
    let incoming_tip = match refs.read_branch(&args.name)? {
        Some(oid) => oid,
        None => bail!("branch '{}' does not exist", args.name),
    };

    let labels = MergeLabels {
        current: current_branch.clone(),
        incoming: args.name.clone(),
    };
    let message = format!("Merge branch '{}' into {current_branch}\n", args.name);

    let merger = Merger::new(&store, repo.work_tree());
    let outcome = merger.merge(&current_tip, &incoming_tip, &labels, signature_now(), &message)?;

    // Stage the merged snapshot either way, conflict-marked entries
    // included, so the unresolved state is what sits in the index.
    let mut index = repo.load_index()?;
    index.replace_with(outcome.snapshot);
    repo.save_index(&index)?;

    match outcome.commit {
        Some(commit) => {
            refs.write_branch(&current_branch, &commit)?;
            println!("Merge successful!");
            println!(
                "[{current_branch} {}] Merge branch '{}'",
                commit.short(),
                args.name
            );
            Ok(0)
        }
        None => {
            println!("Automatic merge failed; fix conflicts and then commit the result.");
            println!();
            println!("Conflicts in:");
            for path in &outcome.conflicts {
                println!("\t{path}");
            }
            println!();
            println!(
                "Resolve conflicts, then run: twig add <paths> && twig commit -m \"Merge {}\"",
                args.name
            );
            Ok(1)
        }
    }
}
