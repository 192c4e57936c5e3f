use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;

use twig_object::{Blob, FileMode, Object};

use super::open_repo;

#[derive(Args)]
pub struct AddArgs {
    /// Files to stage, relative to the repository root
    #[arg(required = true)]
    paths: Vec<String>,
}

pub fn run(args: &AddArgs) -> Result<i32> {
    let repo = open_repo()?;
    let store = repo.store();
    let mut index = repo.load_index()?;

    for path in &args.paths {
        let full = repo.work_tree().join(path);
        if !full.is_file() {
            bail!("pathspec '{path}' did not match any files");
        }
        let content = fs::read(&full)?;
        let oid = store.write(&Object::Blob(Blob::from_bytes(content)))?;
        index.add(path.clone(), file_mode(&full)?, oid);
        println!("added '{path}'");
    }

    repo.save_index(&index)?;
    Ok(0)
}

#[cfg(unix)]
fn file_mode(path: &Path) -> Result<FileMode> {
    use std::os::unix::fs::PermissionsExt;
    let mode = fs::metadata(path)?.permissions().mode();
    Ok(if mode & 0o111 != 0 {
        FileMode::Executable
    } else {
        FileMode::Regular
    })
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> Result<FileMode> {
    Ok(FileMode::Regular)
}
