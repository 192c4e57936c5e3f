use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use twig_merkle::file_blob_digest;

#[derive(Args)]
pub struct HashObjectArgs {
    /// File whose blob digest to compute
    file: PathBuf,
}

pub fn run(args: &HashObjectArgs) -> Result<i32> {
    if !args.file.is_file() {
        bail!("file not found: {}", args.file.display());
    }
    println!("{}", file_blob_digest(&args.file)?);
    Ok(0)
}
