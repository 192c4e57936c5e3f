//! Branch reference storage.
//!
//! Refs are loose files under `.twig/refs/heads/`, each holding one hex
//! digest and a newline. `HEAD` is either a symref line
//! (`ref: refs/heads/<branch>`) or a bare digest when detached. Ref files
//! are treated as exclusively owned by the invoking process for the
//! duration of one command; there is no cross-process locking protocol.

mod store;

pub use store::RefStore;

use twig_hash::ObjectId;

/// Where HEAD points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// No HEAD file yet (the directory is not an initialized repository).
    Unborn,
    /// HEAD is a symref to a branch. The branch itself may not exist yet
    /// (a fresh repository before the first commit).
    Branch(String),
    /// HEAD points directly at a commit.
    Detached(ObjectId),
}

/// Errors from ref operations.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("invalid branch name: '{0}'")]
    InvalidName(String),

    #[error("'{path}': {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed ref '{name}': {reason}")]
    Malformed { name: String, reason: String },

    #[error(transparent)]
    Hash(#[from] twig_hash::HashError),
}

/// Validate a branch name: non-empty, no path traversal, no whitespace,
/// no ref-syntax characters.
pub fn validate_branch_name(name: &str) -> Result<(), RefError> {
    let bad = name.is_empty()
        || name.starts_with('-')
        || name.starts_with('.')
        || name.ends_with('/')
        || name.contains("..")
        || name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ':' | '~' | '^' | '?' | '*' | '[' | '\\'));
    if bad {
        return Err(RefError::InvalidName(name.to_string()));
    }
    Ok(())
}
