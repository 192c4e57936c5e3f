//! Incremental 160-bit digest engine.
//!
//! The engine accumulates input into fixed 64-byte blocks and runs the
//! compression function as each block fills. Finalization applies the
//! standard padding rule: a single set bit, zeros until the buffered length
//! is congruent to 56 modulo 64, then the total input length in bits as a
//! 64-bit big-endian integer.
//!
//! The contract the rest of twig depends on is determinism: the same byte
//! sequence produces the same digest no matter how it is split across
//! [`update`](Hasher::update) calls.

use crate::{ObjectId, DIGEST_LEN};

const BLOCK_LEN: usize = 64;

/// Chaining-value seed for an empty message.
const INIT: [u32; 5] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476, 0xc3d2_e1f0];

/// Streaming digest computation.
///
/// Feed data with [`update`](Hasher::update) (or the [`std::io::Write`]
/// impl), then call [`finalize`](Hasher::finalize) to obtain the
/// [`ObjectId`]. Finalizing resets the engine so the value can be reused
/// for another message.
pub struct Hasher {
    state: [u32; 5],
    buffer: [u8; BLOCK_LEN],
    buffered: usize,
    /// Bytes already run through the compression function.
    processed: u64,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a fresh engine.
    pub fn new() -> Self {
        Self {
            state: INIT,
            buffer: [0u8; BLOCK_LEN],
            buffered: 0,
            processed: 0,
        }
    }

    /// Feed a byte sequence into the engine.
    pub fn update(&mut self, data: &[u8]) {
        let mut rest = data;

        // Top up a partially filled block first.
        if self.buffered > 0 {
            let take = rest.len().min(BLOCK_LEN - self.buffered);
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&rest[..take]);
            self.buffered += take;
            rest = &rest[take..];
            if self.buffered == BLOCK_LEN {
                let block = self.buffer;
                self.compress(&block);
                self.buffered = 0;
            }
        }

        // Whole blocks straight from the input.
        while rest.len() >= BLOCK_LEN {
            let (block, tail) = rest.split_at(BLOCK_LEN);
            let mut arr = [0u8; BLOCK_LEN];
            arr.copy_from_slice(block);
            self.compress(&arr);
            rest = tail;
        }

        // Keep the tail for the next call.
        if !rest.is_empty() {
            self.buffer[..rest.len()].copy_from_slice(rest);
            self.buffered = rest.len();
        }
    }

    /// Apply padding, produce the digest, and reset for reuse.
    pub fn finalize(&mut self) -> ObjectId {
        let total_bits = (self.processed + self.buffered as u64) * 8;

        self.push_byte(0x80);
        while self.buffered != 56 {
            self.push_byte(0);
        }
        for &b in total_bits.to_be_bytes().iter() {
            self.push_byte(b);
        }
        debug_assert_eq!(self.buffered, 0, "length bytes must close the final block");

        let mut digest = [0u8; DIGEST_LEN];
        for (i, word) in self.state.iter().enumerate() {
            digest[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }

        *self = Self::new();
        ObjectId::from_digest(digest)
    }

    /// Convenience: digest a complete message in one call.
    pub fn digest(data: &[u8]) -> ObjectId {
        let mut h = Self::new();
        h.update(data);
        h.finalize()
    }

    fn push_byte(&mut self, b: u8) {
        self.buffer[self.buffered] = b;
        self.buffered += 1;
        if self.buffered == BLOCK_LEN {
            let block = self.buffer;
            self.compress(&block);
            self.buffered = 0;
        }
    }

    /// Process one full 64-byte block into the chaining state.
    fn compress(&mut self, block: &[u8; BLOCK_LEN]) {
        // Expand the 16 input words to the 80-word message schedule.
        let mut w = [0u32; 80];
        for (i, chunk) in block.chunks_exact(4).enumerate() {
            w[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        for i in 16..80 {
            w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.state;

        for (i, &word) in w.iter().enumerate() {
            let (f, k) = match i {
                0..=19 => ((b & c) | (!b & d), 0x5a82_7999),
                20..=39 => (b ^ c ^ d, 0x6ed9_eba1),
                40..=59 => ((b & c) | (b & d) | (c & d), 0x8f1b_bcdc),
                _ => (b ^ c ^ d, 0xca62_c1d6),
            };
            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(word);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        self.state[0] = self.state[0].wrapping_add(a);
        self.state[1] = self.state[1].wrapping_add(b);
        self.state[2] = self.state[2].wrapping_add(c);
        self.state[3] = self.state[3].wrapping_add(d);
        self.state[4] = self.state[4].wrapping_add(e);
        self.processed += BLOCK_LEN as u64;
    }
}

impl std::io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
