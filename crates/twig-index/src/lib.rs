//! The staging area (index).
//!
//! A text file at `.twig/index`, one `"<mode> <digest> <path>"` line per
//! staged entry, kept path-sorted. State is always passed explicitly
//! through [`Index::load`] and [`Index::save`]; nothing is cached across
//! calls or shared between commands.

pub mod ignore;

pub use ignore::IgnoreList;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use twig_hash::ObjectId;
use twig_object::FileMode;

/// One staged entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub mode: FileMode,
    pub oid: ObjectId,
}

/// Errors from index I/O.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("malformed index line {line}: '{text}'")]
    Malformed { line: usize, text: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The staging area: path → entry, path-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    entries: BTreeMap<String, IndexEntry>,
}

impl Index {
    /// Load the index from its file. A missing file is an empty index.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut entries = BTreeMap::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let malformed = || IndexError::Malformed {
                line: lineno + 1,
                text: line.to_string(),
            };
            let mut fields = line.splitn(3, ' ');
            let (mode, digest, path) =
                match (fields.next(), fields.next(), fields.next()) {
                    (Some(m), Some(d), Some(p)) if !p.is_empty() => (m, d, p),
                    _ => return Err(malformed()),
                };
            let mode: FileMode = mode.parse().map_err(|_| malformed())?;
            let oid = ObjectId::from_hex(digest).map_err(|_| malformed())?;
            entries.insert(path.to_string(), IndexEntry { mode, oid });
        }
        Ok(Self { entries })
    }

    /// Persist the index, one line per entry in path order.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        let mut out = String::new();
        for (file_path, entry) in &self.entries {
            out.push_str(&format!("{} {} {}\n", entry.mode, entry.oid, file_path));
        }
        fs::write(path, out)?;
        Ok(())
    }

    /// Stage a path.
    pub fn add(&mut self, path: impl Into<String>, mode: FileMode, oid: ObjectId) {
        self.entries.insert(path.into(), IndexEntry { mode, oid });
    }

    /// Unstage a path. Returns the removed entry, if any.
    pub fn remove(&mut self, path: &str) -> Option<IndexEntry> {
        self.entries.remove(path)
    }

    pub fn get(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the whole staging state with a snapshot.
    pub fn replace_with(
        &mut self,
        snapshot: impl IntoIterator<Item = (String, (FileMode, ObjectId))>,
    ) {
        self.entries = snapshot
            .into_iter()
            .map(|(path, (mode, oid))| (path, IndexEntry { mode, oid }))
            .collect();
    }

    /// The staged state as a path→(mode, digest) snapshot.
    pub fn to_snapshot(&self) -> BTreeMap<String, (FileMode, ObjectId)> {
        self.entries
            .iter()
            .map(|(path, entry)| (path.clone(), (entry.mode, entry.oid)))
            .collect()
    }
}
