use bstr::ByteSlice;
use twig_hash::ObjectId;

use crate::ObjectError;

/// An identity plus timestamp, as it appears on `author` and `committer`
/// header lines: `"Name <email> <unix-seconds> <tz-offset>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub email: String,
    /// Seconds since the Unix epoch.
    pub when: i64,
    /// Timezone offset as written, e.g. `"+0000"`.
    pub tz: String,
}

impl Signature {
    /// Parse from the value part of an author/committer header line.
    pub fn parse(value: &str) -> Result<Self, ObjectError> {
        let open = value
            .find('<')
            .ok_or_else(|| ObjectError::InvalidSignature(format!("missing '<' in '{value}'")))?;
        let close = value[open..]
            .find('>')
            .map(|p| p + open)
            .ok_or_else(|| ObjectError::InvalidSignature(format!("missing '>' in '{value}'")))?;

        let name = value[..open].trim_end().to_string();
        let email = value[open + 1..close].to_string();

        let mut rest = value[close + 1..].split_whitespace();
        let when = rest
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ObjectError::InvalidSignature(format!("missing timestamp in '{value}'")))?;
        let tz = rest.next().unwrap_or("+0000").to_string();

        Ok(Self {
            name,
            email,
            when,
            tz,
        })
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> {} {}", self.name, self.email, self.when, self.tz)
    }
}

/// A commit object: one history node.
///
/// Zero parents is a root commit, one is an ordinary commit, two is a merge
/// commit. Parents are bare digest references; there are no back-pointers
/// and no reverse-edge index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Digest of the snapshot tree. `None` when the stored commit carried
    /// no `tree` header; callers must treat such a commit as invalid.
    pub tree: Option<ObjectId>,
    pub parents: Vec<ObjectId>,
    pub author: Option<Signature>,
    pub committer: Option<Signature>,
    /// Everything after the first blank line.
    pub message: String,
}

impl Commit {
    /// Construct a commit with all fields present.
    pub fn new(
        tree: ObjectId,
        parents: Vec<ObjectId>,
        signature: Signature,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tree: Some(tree),
            parents,
            author: Some(signature.clone()),
            committer: Some(signature),
            message: message.into(),
        }
    }

    /// Parse a commit payload.
    ///
    /// Header lines (`tree`, zero or more `parent`, `author`, `committer`)
    /// run up to the first blank line; the message is everything after.
    /// Missing headers leave the corresponding field absent rather than
    /// failing the parse.
    pub fn parse(payload: &[u8]) -> Result<Self, ObjectError> {
        let mut tree = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;

        let mut pos = 0;
        while pos < payload.len() {
            if payload[pos] == b'\n' {
                pos += 1;
                break;
            }
            let line_end = payload[pos..]
                .find_byte(b'\n')
                .map(|p| p + pos)
                .unwrap_or(payload.len());
            let line = std::str::from_utf8(&payload[pos..line_end])
                .map_err(|_| ObjectError::InvalidHeader("non-UTF-8 commit header".into()))?;

            if let Some((key, value)) = line.split_once(' ') {
                match key {
                    "tree" => tree = Some(ObjectId::from_hex(value)?),
                    "parent" => parents.push(ObjectId::from_hex(value)?),
                    "author" => author = Some(Signature::parse(value)?),
                    "committer" => committer = Some(Signature::parse(value)?),
                    // Unknown headers are skipped, not errors.
                    _ => {}
                }
            }
            pos = line_end + 1;
        }

        let message = String::from_utf8_lossy(&payload[pos.min(payload.len())..]).into_owned();

        Ok(Self {
            tree,
            parents,
            author,
            committer,
            message,
        })
    }

    /// Serialize to the canonical payload.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = String::new();
        if let Some(tree) = &self.tree {
            out.push_str(&format!("tree {tree}\n"));
        }
        for parent in &self.parents {
            out.push_str(&format!("parent {parent}\n"));
        }
        if let Some(author) = &self.author {
            out.push_str(&format!("author {author}\n"));
        }
        if let Some(committer) = &self.committer {
            out.push_str(&format!("committer {committer}\n"));
        }
        out.push('\n');
        out.push_str(&self.message);
        out.into_bytes()
    }

    /// Is this a root commit? (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Is this a merge commit? (two parents)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// The first parent, if any. This is the chain `log` and the integrity
    /// walk follow.
    pub fn first_parent(&self) -> Option<ObjectId> {
        self.parents.first().copied()
    }

    /// The first line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
