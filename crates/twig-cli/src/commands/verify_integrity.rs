use anyhow::Result;

use twig_merkle::integrity_check;

use super::open_repo;

pub fn run() -> Result<i32> {
    let repo = open_repo()?;
    let store = repo.store();
    let head = repo.refs().head_commit()?;

    match integrity_check(&store, head) {
        Ok(report) => {
            println!(
                "Integrity OK: verified {} commit(s), {} object(s)",
                report.commits, report.objects
            );
            Ok(0)
        }
        Err(e) => {
            eprintln!("Integrity check FAILED: {e}");
            Ok(1)
        }
    }
}
