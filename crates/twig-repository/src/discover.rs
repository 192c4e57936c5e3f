use std::path::Path;

use crate::{RepoError, Repository, TWIG_DIR};

impl Repository {
    /// Walk upward from `start` until a directory containing `.twig/` is
    /// found.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, RepoError> {
        let start = start.as_ref();
        let mut cursor = Some(start);
        while let Some(dir) = cursor {
            if dir.join(TWIG_DIR).is_dir() {
                return Self::open(dir);
            }
            cursor = dir.parent();
        }
        Err(RepoError::NotARepository(start.to_path_buf()))
    }
}
