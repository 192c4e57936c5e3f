use std::fmt;
use std::str::FromStr;

use crate::hex::{decode_digest, encode_digest};
use crate::{HashError, DIGEST_LEN};

/// A twig object identifier: the 160-bit digest of an object's content.
///
/// Canonically rendered as 40 lowercase hex characters. `ObjectId` is a pure
/// deterministic function of the hashed bytes; two equal ids mean equal
/// stored content for all practical purposes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; DIGEST_LEN]);

impl ObjectId {
    /// The null id (all zeros). Never produced by hashing real content.
    pub const NULL: Self = Self([0u8; DIGEST_LEN]);

    /// Create an ObjectId from a raw digest.
    pub const fn from_digest(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Create an ObjectId from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HashError> {
        if bytes.len() != DIGEST_LEN {
            return Err(HashError::InvalidDigestLength {
                expected: DIGEST_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; DIGEST_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Create an ObjectId from a 40-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        decode_digest(hex).map(Self)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Is this the null (all-zeros) id?
    pub fn is_null(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// The canonical lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        encode_digest(&self.0)
    }

    /// Abbreviated hex rendering (first 7 characters), for display.
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }

    /// The sharded store path component `"xx/yyyy..."`: first two hex
    /// characters as the directory, remaining 38 as the file name.
    pub fn store_path(&self) -> String {
        let hex = self.to_hex();
        format!("{}/{}", &hex[..2], &hex[2..])
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short())
    }
}

impl FromStr for ObjectId {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
