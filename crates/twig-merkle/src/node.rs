use twig_hash::{Hasher, ObjectId};

/// Domain prefix fed into every composite-node digest, so a directory hash
/// can never collide with a blob hash of the same serialization.
const COMPOSITE_PREFIX: &[u8] = b"merkle_dir ";

/// A transient node in a Merkle view of a snapshot or the work tree.
///
/// A leaf carries the already-computed blob digest of one tracked file; it
/// is never re-hashed here. A composite node's digest chains its direct
/// children: the hash of their sorted `"{path}:{digest};"` serialization,
/// which recursively commits to the whole subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleNode {
    path: String,
    digest: ObjectId,
    leaf: bool,
    children: Vec<MerkleNode>,
}

impl MerkleNode {
    /// A leaf for one tracked file. `digest` is the digest of the file's
    /// blob encoding, directly comparable to object-store digests.
    pub fn leaf(path: impl Into<String>, digest: ObjectId) -> Self {
        Self {
            path: path.into(),
            digest,
            leaf: true,
            children: Vec::new(),
        }
    }

    /// A composite node over the given children. The digest is computed
    /// bottom-up from the children's digests at construction time.
    pub fn composite(path: impl Into<String>, children: Vec<MerkleNode>) -> Self {
        let digest = composite_digest(&children);
        Self {
            path: path.into(),
            digest,
            leaf: false,
            children,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn digest(&self) -> ObjectId {
        self.digest
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    pub fn children(&self) -> &[MerkleNode] {
        &self.children
    }

    /// Recompute this node's digest from its current shape: a leaf yields
    /// its stored digest, a composite re-derives the chained hash of its
    /// direct children.
    pub fn compute_digest(&self) -> ObjectId {
        if self.leaf {
            self.digest
        } else {
            composite_digest(&self.children)
        }
    }

    /// Does the node hash to the expected digest? Used both for tamper
    /// detection and for post-construction self-checks.
    pub fn verify(&self, expected: &ObjectId) -> bool {
        self.compute_digest() == *expected
    }
}

/// The composite rule: hash `"merkle_dir "` followed by each direct child's
/// `"{path}:{digest};"`, children ordered by path.
fn composite_digest(children: &[MerkleNode]) -> ObjectId {
    let mut sorted: Vec<&MerkleNode> = children.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let mut hasher = Hasher::new();
    hasher.update(COMPOSITE_PREFIX);
    for child in sorted {
        hasher.update(format!("{}:{};", child.path, child.digest).as_bytes());
    }
    hasher.finalize()
}
