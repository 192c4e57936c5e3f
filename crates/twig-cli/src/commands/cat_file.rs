use std::io::Write;

use anyhow::{bail, Result};
use clap::Args;

use twig_hash::ObjectId;

use super::open_repo;

#[derive(Args)]
pub struct CatFileArgs {
    /// Digest of the object to print
    digest: String,

    /// Print the kind instead of the payload
    #[arg(short = 't', long = "type")]
    kind_only: bool,
}

pub fn run(args: &CatFileArgs) -> Result<i32> {
    let repo = open_repo()?;
    let store = repo.store();

    let oid = ObjectId::from_hex(&args.digest)?;
    let obj = match store.read(&oid)? {
        Some(obj) => obj,
        None => bail!("object not found: {oid}"),
    };

    if args.kind_only {
        println!("{}", obj.kind());
        return Ok(0);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(&obj.payload())?;
    Ok(0)
}
