use std::fs;
use std::path::Path;

use crate::{RepoError, Repository, TWIG_DIR};

/// What `init` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A fresh control directory was created.
    Created,
    /// The path already held a repository; nothing was touched.
    Reinitialized,
}

impl Repository {
    /// Initialize a repository at `work_tree`.
    ///
    /// Creates `.twig/` with `objects/`, `refs/heads/`, `refs/tags/`, and a
    /// `HEAD` symref to `refs/heads/main`. Re-running init on an existing
    /// repository is a safe no-op; existing data is never overwritten.
    pub fn init(work_tree: impl AsRef<Path>) -> Result<(Self, InitOutcome), RepoError> {
        let work_tree = work_tree.as_ref().to_path_buf();
        let twig_dir = work_tree.join(TWIG_DIR);

        if twig_dir.join("HEAD").is_file() {
            return Ok((
                Self {
                    work_tree,
                    twig_dir,
                },
                InitOutcome::Reinitialized,
            ));
        }

        fs::create_dir_all(twig_dir.join("objects"))?;
        fs::create_dir_all(twig_dir.join("refs").join("heads"))?;
        fs::create_dir_all(twig_dir.join("refs").join("tags"))?;
        fs::write(twig_dir.join("HEAD"), "ref: refs/heads/main\n")?;

        Ok((
            Self {
                work_tree,
                twig_dir,
            },
            InitOutcome::Created,
        ))
    }
}
