use std::fs;

use anyhow::Result;
use clap::{Args, Subcommand};

use twig_index::Index;
use twig_snapshot::SnapshotReader;

use super::open_repo;

#[derive(Args)]
pub struct StashArgs {
    #[command(subcommand)]
    action: StashAction,
}

#[derive(Subcommand)]
enum StashAction {
    /// Move the staged state aside and clear the working tree of it
    Save,
    /// Restore the most recent stash entry
    Pop,
    /// List stash entries, newest first
    List,
}

pub fn run(args: &StashArgs) -> Result<i32> {
    match args.action {
        StashAction::Save => save(),
        StashAction::Pop => pop(),
        StashAction::List => list(),
    }
}

fn save() -> Result<i32> {
    let repo = open_repo()?;
    let index = repo.load_index()?;
    if index.is_empty() {
        println!("No changes to stash");
        return Ok(0);
    }

    let stash_dir = repo.stash_dir();
    fs::create_dir_all(&stash_dir)?;

    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let stash_id = stamp.to_string();
    index.save(&stash_dir.join(&stash_id))?;

    // Clear both the staging area and the stashed files on disk.
    for (path, _) in index.iter() {
        let full = repo.work_tree().join(path);
        if full.exists() {
            fs::remove_file(full)?;
        }
    }
    repo.save_index(&Index::default())?;

    println!("Saved working directory and index state");
    println!("Stash ID: {stash_id}");
    Ok(0)
}

fn pop() -> Result<i32> {
    let repo = open_repo()?;
    let latest = match latest_stash(&repo)? {
        Some(id) => id,
        None => {
            println!("No stash entries found");
            return Ok(0);
        }
    };

    let stash_file = repo.stash_dir().join(&latest);
    let stashed = Index::load(&stash_file)?;

    let store = repo.store();
    let reader = SnapshotReader::new(&store);
    for (path, entry) in stashed.iter() {
        let content = reader.read_blob(&entry.oid)?;
        let dest = repo.work_tree().join(path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, content)?;
    }

    repo.save_index(&stashed)?;
    fs::remove_file(&stash_file)?;

    println!("Restored stash: {latest}");
    println!("Dropped stash");
    Ok(0)
}

fn list() -> Result<i32> {
    let repo = open_repo()?;
    let mut ids = stash_ids(&repo)?;
    if ids.is_empty() {
        println!("No stash entries found");
        return Ok(0);
    }
    ids.sort_by(|a, b| b.cmp(a));
    println!("Stash entries:");
    for (i, id) in ids.iter().enumerate() {
        println!("stash@{{{i}}}: {id}");
    }
    Ok(0)
}

fn stash_ids(repo: &twig_repository::Repository) -> Result<Vec<String>> {
    let dir = repo.stash_dir();
    let mut ids = Vec::new();
    let entries = match fs::read_dir(&dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ids),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        if entry.path().is_file() {
            if let Ok(name) = entry.file_name().into_string() {
                ids.push(name);
            }
        }
    }
    Ok(ids)
}

fn latest_stash(repo: &twig_repository::Repository) -> Result<Option<String>> {
    Ok(stash_ids(repo)?.into_iter().max())
}
