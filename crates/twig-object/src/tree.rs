use std::collections::BTreeMap;

use bstr::ByteSlice;
use twig_hash::ObjectId;

use crate::ObjectError;

/// File mode for tree and index entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileMode {
    /// Regular file (100644)
    #[default]
    Regular,
    /// Executable file (100755)
    Executable,
}

impl FileMode {
    /// Parse from the octal ASCII form used in trees and the index.
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"100644" => Ok(Self::Regular),
            b"100755" => Ok(Self::Executable),
            other => Err(ObjectError::InvalidFileMode(
                String::from_utf8_lossy(other).into(),
            )),
        }
    }

    /// The canonical octal ASCII form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "100644",
            Self::Executable => "100755",
        }
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileMode {
    type Err = ObjectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

/// One entry in a tree: a tracked path and the blob it points at.
///
/// Trees in twig are single-level: `path` is the full work-tree-relative
/// path and may contain `/` separators, and every entry references a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub path: String,
    pub oid: ObjectId,
}

/// A tree object: the ordered snapshot description of one commit.
///
/// The payload is one `"<mode> blob <digest> <path>"` line per entry,
/// sorted by path so that identical snapshots always encode to identical
/// bytes (and therefore identical digests).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from a path→(mode, digest) snapshot. Entries come out
    /// path-sorted by construction.
    pub fn from_snapshot<'a>(
        snapshot: impl IntoIterator<Item = (&'a String, &'a (FileMode, ObjectId))>,
    ) -> Self {
        let sorted: BTreeMap<_, _> = snapshot.into_iter().collect();
        Self {
            entries: sorted
                .into_iter()
                .map(|(path, &(mode, oid))| TreeEntry {
                    mode,
                    path: path.clone(),
                    oid,
                })
                .collect(),
        }
    }

    /// Parse a tree payload.
    ///
    /// Splits on newlines, then on spaces: `mode kind digest path`, where
    /// the path is the remainder of the line and may itself contain spaces.
    /// A missing trailing newline is tolerated.
    pub fn parse(payload: &[u8]) -> Result<Self, ObjectError> {
        let mut entries = Vec::new();
        for (lineno, line) in payload.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let text = line.to_str().map_err(|_| ObjectError::InvalidTreeEntry {
                line: lineno + 1,
                reason: "entry is not valid UTF-8".into(),
            })?;
            let mut fields = text.splitn(4, ' ');
            let (mode, _kind, digest, path) = match (
                fields.next(),
                fields.next(),
                fields.next(),
                fields.next(),
            ) {
                (Some(m), Some(k), Some(d), Some(p)) if !p.is_empty() => (m, k, d, p),
                _ => {
                    return Err(ObjectError::InvalidTreeEntry {
                        line: lineno + 1,
                        reason: format!("expected 'mode kind digest path', got '{text}'"),
                    })
                }
            };
            entries.push(TreeEntry {
                mode: mode.parse()?,
                path: path.to_string(),
                oid: ObjectId::from_hex(digest)?,
            });
        }
        Ok(Self { entries })
    }

    /// Serialize to the canonical payload, entries sorted by path.
    pub fn serialize(&self) -> Vec<u8> {
        let mut sorted: Vec<&TreeEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.path.cmp(&b.path));

        let mut out = Vec::new();
        for entry in sorted {
            out.extend_from_slice(
                format!("{} blob {} {}\n", entry.mode, entry.oid, entry.path).as_bytes(),
            );
        }
        out
    }

    /// Flatten into a path→blobDigest mapping. A later duplicate path wins,
    /// though duplicates should not occur in trees twig wrote itself.
    pub fn to_map(&self) -> BTreeMap<String, ObjectId> {
        self.entries
            .iter()
            .map(|e| (e.path.clone(), e.oid))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
