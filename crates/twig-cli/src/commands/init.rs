use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use twig_repository::{InitOutcome, Repository, TWIG_DIR};

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize
    #[arg(default_value = ".")]
    path: PathBuf,
}

pub fn run(args: &InitArgs) -> Result<i32> {
    let (repo, outcome) = Repository::init(&args.path)?;
    match outcome {
        InitOutcome::Created => println!(
            "Initialized empty twig repository in {}",
            repo.work_tree().join(TWIG_DIR).display()
        ),
        InitOutcome::Reinitialized => println!(
            "Reinitialized existing twig repository in {}",
            repo.work_tree().join(TWIG_DIR).display()
        ),
    }
    Ok(0)
}
