pub mod add;
pub mod branch;
pub mod cat_file;
pub mod checkout;
pub mod commit;
pub mod compare_branches;
pub mod diff_tree;
pub mod hash_object;
pub mod init;
pub mod log;
pub mod merge;
pub mod stash;
pub mod status;
pub mod switch;
pub mod verify_integrity;
pub mod verify_tree;
pub mod write_tree;

use anyhow::{Context, Result};
use clap::Subcommand;

use twig_object::Signature;
use twig_repository::Repository;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new repository
    Init(init::InitArgs),
    /// Add file contents to the staging area
    Add(add::AddArgs),
    /// Record the staged snapshot as a new commit
    Commit(commit::CommitArgs),
    /// Show staged, unstaged, and untracked changes
    Status,
    /// Show the commit history of HEAD
    Log,
    /// List branches, or create one at the current commit
    Branch(branch::BranchArgs),
    /// Switch to a branch
    Switch(switch::SwitchArgs),
    /// Check out a branch or a commit (detaching HEAD)
    Checkout(checkout::CheckoutArgs),
    /// Merge a branch into the current branch
    Merge(merge::MergeArgs),
    /// Save, restore, or list staged states
    Stash(stash::StashArgs),
    /// Build a Merkle tree and check it against its own root
    VerifyTree(verify_tree::VerifyTreeArgs),
    /// Compare two trees, or the working tree against a commit
    DiffTree(diff_tree::DiffTreeArgs),
    /// Re-hash every object reachable from HEAD
    VerifyIntegrity,
    /// Compare the content of two branches
    CompareBranches(compare_branches::CompareBranchesArgs),
    /// Compute the object id a file's content would get
    HashObject(hash_object::HashObjectArgs),
    /// Print a stored object's payload
    CatFile(cat_file::CatFileArgs),
    /// Write the staged snapshot as a tree object
    WriteTree,
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Init(args) => init::run(args),
        Commands::Add(args) => add::run(args),
        Commands::Commit(args) => commit::run(args),
        Commands::Status => status::run(),
        Commands::Log => log::run(),
        Commands::Branch(args) => branch::run(args),
        Commands::Switch(args) => switch::run(args),
        Commands::Checkout(args) => checkout::run(args),
        Commands::Merge(args) => merge::run(args),
        Commands::Stash(args) => stash::run(args),
        Commands::VerifyTree(args) => verify_tree::run(args),
        Commands::DiffTree(args) => diff_tree::run(args),
        Commands::VerifyIntegrity => verify_integrity::run(),
        Commands::CompareBranches(args) => compare_branches::run(args),
        Commands::HashObject(args) => hash_object::run(args),
        Commands::CatFile(args) => cat_file::run(args),
        Commands::WriteTree => write_tree::run(),
    }
}

/// Discover the repository containing the current directory.
pub(crate) fn open_repo() -> Result<Repository> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    Ok(Repository::discover(&cwd)?)
}

/// The committer identity: `TWIG_AUTHOR_NAME`/`TWIG_AUTHOR_EMAIL` with
/// defaults, stamped with the current time.
pub(crate) fn signature_now() -> Signature {
    let when = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    Signature {
        name: std::env::var("TWIG_AUTHOR_NAME").unwrap_or_else(|_| "Twig User".into()),
        email: std::env::var("TWIG_AUTHOR_EMAIL").unwrap_or_else(|_| "user@twig.local".into()),
        when,
        tz: "+0000".into(),
    }
}
