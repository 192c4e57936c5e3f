//! Object model for the twig version-control engine.
//!
//! Twig persists three kinds of objects (blobs, trees, and commits), each
//! encoded as `"<kind> <byteLength>\0<payload>"`. This crate provides the
//! Rust types for those payloads, their parsing from raw bytes, and their
//! serialization back to the canonical form.

mod blob;
mod commit;
pub mod header;
mod tree;

pub use blob::Blob;
pub use commit::{Commit, Signature};
pub use tree::{FileMode, Tree, TreeEntry};

use bstr::BString;
use twig_hash::{HashError, Hasher, ObjectId};

/// Errors produced by object encoding and decoding.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("unrecognized object kind: {0}")]
    InvalidKind(BString),

    #[error("invalid object header: {0}")]
    InvalidHeader(String),

    #[error("truncated object: header declares {expected} bytes, payload has {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("invalid tree entry on line {line}: {reason}")]
    InvalidTreeEntry { line: usize, reason: String },

    #[error("invalid file mode: {0}")]
    InvalidFileMode(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// The three kinds of twig objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    /// Parse from the kind token in an object header.
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"blob" => Ok(Self::Blob),
            b"tree" => Ok(Self::Tree),
            b"commit" => Ok(Self::Commit),
            _ => Err(ObjectError::InvalidKind(BString::from(s))),
        }
    }

    /// The canonical kind token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectKind {
    type Err = ObjectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

/// A decoded twig object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    /// Decode from encoded bytes (header + payload).
    pub fn decode(data: &[u8]) -> Result<Self, ObjectError> {
        let (kind, payload_len, header_len) = header::parse_header(data)?;
        let payload = &data[header_len..];
        if payload.len() < payload_len {
            return Err(ObjectError::Truncated {
                expected: payload_len,
                actual: payload.len(),
            });
        }
        Self::decode_payload(kind, &payload[..payload_len])
    }

    /// Decode a payload with a known kind (no header).
    pub fn decode_payload(kind: ObjectKind, payload: &[u8]) -> Result<Self, ObjectError> {
        match kind {
            ObjectKind::Blob => Ok(Self::Blob(Blob::from_bytes(payload))),
            ObjectKind::Tree => Ok(Self::Tree(Tree::parse(payload)?)),
            ObjectKind::Commit => Ok(Self::Commit(Commit::parse(payload)?)),
        }
    }

    /// Encode to the canonical on-disk form (header + payload).
    pub fn encode(&self) -> Vec<u8> {
        let payload = self.payload();
        let mut out = header::write_header(self.kind(), payload.len());
        out.extend_from_slice(&payload);
        out
    }

    /// Serialize just the payload (no header).
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Self::Blob(b) => b.data.clone(),
            Self::Tree(t) => t.serialize(),
            Self::Commit(c) => c.serialize(),
        }
    }

    /// The object's kind.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Blob(_) => ObjectKind::Blob,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Commit(_) => ObjectKind::Commit,
        }
    }

    /// The object's id: the digest of its encoded form.
    pub fn id(&self) -> ObjectId {
        Hasher::digest(&self.encode())
    }
}
