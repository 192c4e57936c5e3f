use anyhow::Result;

use twig_snapshot::SnapshotReader;

use super::open_repo;

pub fn run() -> Result<i32> {
    let repo = open_repo()?;
    let store = repo.store();
    let reader = SnapshotReader::new(&store);

    let mut cursor = repo.refs().head_commit()?;
    let mut first = true;

    while let Some(oid) = cursor {
        let commit = reader.read_commit(&oid)?;

        if !first {
            println!();
        }
        first = false;

        println!("commit {oid}");
        if let Some(author) = &commit.author {
            println!("Author: {} <{}>", author.name, author.email);
            println!("Date:   {} {}", author.when, author.tz);
        }
        println!();
        for line in commit.message.lines() {
            println!("    {line}");
        }

        cursor = commit.first_parent();
    }

    Ok(0)
}
