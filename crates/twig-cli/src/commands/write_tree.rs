use anyhow::{bail, Result};

use twig_object::{Object, Tree};

use super::open_repo;

pub fn run() -> Result<i32> {
    let repo = open_repo()?;
    let index = repo.load_index()?;
    if index.is_empty() {
        bail!("staging area is empty; nothing to write");
    }

    let snapshot = index.to_snapshot();
    let oid = repo
        .store()
        .write(&Object::Tree(Tree::from_snapshot(&snapshot)))?;
    println!("{oid}");
    Ok(0)
}
