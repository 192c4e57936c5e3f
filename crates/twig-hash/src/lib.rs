//! Digest computation and object identity for the twig version-control engine.
//!
//! This crate provides the 160-bit [`ObjectId`] type, the incremental
//! [`Hasher`](hasher::Hasher) that produces it, and hex encoding/decoding.
//! Everything content-addressed in twig (blobs, trees, commits, Merkle
//! composites) is keyed by an `ObjectId`.

mod error;
pub mod hasher;
pub mod hex;
mod oid;

pub use error::HashError;
pub use hasher::Hasher;
pub use oid::ObjectId;

/// Length of a raw digest in bytes.
pub const DIGEST_LEN: usize = 20;

/// Length of a digest rendered as lowercase hex.
pub const HEX_LEN: usize = 40;
