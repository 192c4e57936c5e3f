//! Repository discovery, initialization, and the working-tree enumerator.
//!
//! A twig repository is a work tree with a `.twig/` control directory:
//! `objects/` (the sharded store), `refs/heads/` and `refs/tags/`, `HEAD`,
//! and the `index` staging file. This crate locates or creates that
//! structure and hands out the per-concern interfaces.

mod discover;
mod init;
mod worktree;

pub use init::InitOutcome;

use std::path::{Path, PathBuf};

use twig_index::{Index, IndexError};
use twig_odb::ObjectStore;
use twig_ref::RefStore;

/// Name of the control-metadata directory.
pub const TWIG_DIR: &str = ".twig";

/// Errors from repository-level operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a twig repository (or any parent up to filesystem root): {0}")]
    NotARepository(PathBuf),

    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Store(#[from] twig_odb::StoreError),

    #[error(transparent)]
    Snapshot(#[from] twig_snapshot::SnapshotError),
}

/// An opened repository: the work tree and its control directory.
pub struct Repository {
    work_tree: PathBuf,
    twig_dir: PathBuf,
}

impl Repository {
    /// Open a repository rooted exactly at `work_tree`, without discovery.
    /// The control directory must already exist.
    pub fn open(work_tree: impl AsRef<Path>) -> Result<Self, RepoError> {
        let work_tree = work_tree.as_ref().to_path_buf();
        let twig_dir = work_tree.join(TWIG_DIR);
        if !twig_dir.is_dir() {
            return Err(RepoError::NotARepository(work_tree));
        }
        Ok(Self {
            work_tree,
            twig_dir,
        })
    }

    /// The work-tree root.
    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    /// The `.twig` control directory.
    pub fn twig_dir(&self) -> &Path {
        &self.twig_dir
    }

    /// The object store under this repository.
    pub fn store(&self) -> ObjectStore {
        ObjectStore::open(self.twig_dir.join("objects"))
    }

    /// The ref store under this repository.
    pub fn refs(&self) -> RefStore {
        RefStore::open(&self.twig_dir)
    }

    /// Path of the staging-area file.
    pub fn index_path(&self) -> PathBuf {
        self.twig_dir.join("index")
    }

    /// Load the staging area. State is explicit in and out; the repository
    /// keeps no staging cache of its own.
    pub fn load_index(&self) -> Result<Index, RepoError> {
        Ok(Index::load(&self.index_path())?)
    }

    /// Persist the staging area.
    pub fn save_index(&self, index: &Index) -> Result<(), RepoError> {
        Ok(index.save(&self.index_path())?)
    }

    /// Directory where stash entries are kept.
    pub fn stash_dir(&self) -> PathBuf {
        self.twig_dir.join("stash")
    }
}
