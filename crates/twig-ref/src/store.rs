use std::fs;
use std::path::{Path, PathBuf};

use twig_hash::ObjectId;

use crate::{validate_branch_name, Head, RefError};

const HEAD_FILE: &str = "HEAD";
const SYMREF_PREFIX: &str = "ref: ";
const HEADS_PREFIX: &str = "refs/heads/";

/// Interface to the loose ref files under a `.twig` directory.
pub struct RefStore {
    twig_dir: PathBuf,
}

impl RefStore {
    /// Open the ref store for the given control directory.
    pub fn open(twig_dir: impl AsRef<Path>) -> Self {
        Self {
            twig_dir: twig_dir.as_ref().to_path_buf(),
        }
    }

    /// Read a branch tip. Returns `Ok(None)` when the branch does not exist.
    pub fn read_branch(&self, name: &str) -> Result<Option<ObjectId>, RefError> {
        validate_branch_name(name)?;
        let path = self.branch_path(name);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(RefError::Io { path, source }),
        };
        let trimmed = content.trim();
        let oid = ObjectId::from_hex(trimmed).map_err(|_| RefError::Malformed {
            name: name.to_string(),
            reason: format!("expected a 40-hex digest, got '{trimmed}'"),
        })?;
        Ok(Some(oid))
    }

    /// Point a branch at a commit, creating it if needed.
    pub fn write_branch(&self, name: &str, oid: &ObjectId) -> Result<(), RefError> {
        validate_branch_name(name)?;
        let path = self.branch_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| RefError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, format!("{oid}\n")).map_err(|source| RefError::Io { path, source })
    }

    /// Does the branch exist?
    pub fn branch_exists(&self, name: &str) -> bool {
        validate_branch_name(name).is_ok() && self.branch_path(name).is_file()
    }

    /// List branch names, sorted.
    pub fn list_branches(&self) -> Result<Vec<String>, RefError> {
        let heads = self.twig_dir.join("refs").join("heads");
        let mut names = Vec::new();
        let entries = match fs::read_dir(&heads) {
            Ok(e) => e,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(names),
            Err(source) => return Err(RefError::Io { path: heads, source }),
        };
        for entry in entries {
            let entry = entry.map_err(|source| RefError::Io {
                path: heads.clone(),
                source,
            })?;
            if entry.path().is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    names.push(name);
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read HEAD.
    pub fn head(&self) -> Result<Head, RefError> {
        let path = self.head_path();
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Head::Unborn),
            Err(source) => return Err(RefError::Io { path, source }),
        };
        let trimmed = content.trim();
        if let Some(target) = trimmed.strip_prefix(SYMREF_PREFIX) {
            let branch = target.strip_prefix(HEADS_PREFIX).ok_or_else(|| {
                RefError::Malformed {
                    name: HEAD_FILE.into(),
                    reason: format!("symref outside refs/heads: '{target}'"),
                }
            })?;
            return Ok(Head::Branch(branch.to_string()));
        }
        let oid = ObjectId::from_hex(trimmed).map_err(|_| RefError::Malformed {
            name: HEAD_FILE.into(),
            reason: format!("expected a symref or digest, got '{trimmed}'"),
        })?;
        Ok(Head::Detached(oid))
    }

    /// The branch HEAD is on, if not detached or unborn.
    pub fn current_branch(&self) -> Result<Option<String>, RefError> {
        match self.head()? {
            Head::Branch(name) => Ok(Some(name)),
            _ => Ok(None),
        }
    }

    /// Resolve HEAD through the symref to a commit digest, if any.
    pub fn head_commit(&self) -> Result<Option<ObjectId>, RefError> {
        match self.head()? {
            Head::Unborn => Ok(None),
            Head::Branch(name) => self.read_branch(&name),
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// Make HEAD a symref to the given branch.
    pub fn set_head_branch(&self, name: &str) -> Result<(), RefError> {
        validate_branch_name(name)?;
        let path = self.head_path();
        fs::write(&path, format!("{SYMREF_PREFIX}{HEADS_PREFIX}{name}\n"))
            .map_err(|source| RefError::Io { path, source })
    }

    /// Detach HEAD at a commit.
    pub fn set_head_detached(&self, oid: &ObjectId) -> Result<(), RefError> {
        let path = self.head_path();
        fs::write(&path, format!("{oid}\n")).map_err(|source| RefError::Io { path, source })
    }

    /// Record a new commit on whatever HEAD points at: the current branch
    /// when on one, HEAD itself when detached or unborn-detached.
    pub fn advance_head(&self, oid: &ObjectId) -> Result<(), RefError> {
        match self.head()? {
            Head::Branch(name) => self.write_branch(&name, oid),
            Head::Detached(_) | Head::Unborn => self.set_head_detached(oid),
        }
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        self.twig_dir.join("refs").join("heads").join(name)
    }

    fn head_path(&self) -> PathBuf {
        self.twig_dir.join(HEAD_FILE)
    }
}
