//! Hex rendering and parsing for 160-bit digests.

use crate::{HashError, DIGEST_LEN, HEX_LEN};

/// Lookup table: ASCII byte → nibble value (255 = invalid).
const HEX_DECODE: [u8; 256] = {
    let mut table = [255u8; 256];
    let mut i = 0u8;
    loop {
        match i {
            b'0'..=b'9' => table[i as usize] = i - b'0',
            b'a'..=b'f' => table[i as usize] = i - b'a' + 10,
            b'A'..=b'F' => table[i as usize] = i - b'A' + 10,
            _ => {}
        }
        if i == 255 {
            break;
        }
        i += 1;
    }
    table
};

const HEX_ENCODE: &[u8; 16] = b"0123456789abcdef";

/// Render a raw digest as 40 lowercase hex characters.
pub fn encode_digest(bytes: &[u8; DIGEST_LEN]) -> String {
    let mut buf = [0u8; HEX_LEN];
    for (i, &b) in bytes.iter().enumerate() {
        buf[i * 2] = HEX_ENCODE[(b >> 4) as usize];
        buf[i * 2 + 1] = HEX_ENCODE[(b & 0x0f) as usize];
    }
    // Only ASCII hex digits were written.
    unsafe { String::from_utf8_unchecked(buf.to_vec()) }
}

/// Parse a 40-character hex string into a raw digest.
///
/// Accepts upper and lower case on input; twig always renders lower case.
pub fn decode_digest(hex: &str) -> Result<[u8; DIGEST_LEN], HashError> {
    let hex = hex.as_bytes();
    if hex.len() != HEX_LEN {
        return Err(HashError::InvalidHexLength {
            expected: HEX_LEN,
            actual: hex.len(),
        });
    }
    let mut out = [0u8; DIGEST_LEN];
    for (i, byte) in out.iter_mut().enumerate() {
        let hi = HEX_DECODE[hex[i * 2] as usize];
        let lo = HEX_DECODE[hex[i * 2 + 1] as usize];
        if hi == 255 {
            return Err(HashError::InvalidHex {
                position: i * 2,
                character: hex[i * 2] as char,
            });
        }
        if lo == 255 {
            return Err(HashError::InvalidHex {
                position: i * 2 + 1,
                character: hex[i * 2 + 1] as char,
            });
        }
        *byte = (hi << 4) | lo;
    }
    Ok(out)
}

/// Check whether a string could be a digest: exactly 40 hex characters.
pub fn is_digest_hex(s: &str) -> bool {
    s.len() == HEX_LEN && s.bytes().all(|b| HEX_DECODE[b as usize] != 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let mut bytes = [0u8; DIGEST_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(13).wrapping_add(7);
        }
        let hex = encode_digest(&bytes);
        assert_eq!(hex.len(), HEX_LEN);
        assert_eq!(decode_digest(&hex).unwrap(), bytes);
    }

    #[test]
    fn decode_mixed_case() {
        let lower = decode_digest("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        let upper = decode_digest("DA39A3EE5E6B4B0D3255BFEF95601890AFD80709").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn decode_invalid_char() {
        let err = decode_digest("zz39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap_err();
        match err {
            HashError::InvalidHex {
                position: 0,
                character: 'z',
            } => {}
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_wrong_length() {
        let err = decode_digest("abcd").unwrap_err();
        assert!(matches!(
            err,
            HashError::InvalidHexLength {
                expected: 40,
                actual: 4
            }
        ));
    }

    #[test]
    fn is_digest_hex_checks() {
        assert!(is_digest_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709"));
        assert!(!is_digest_hex("da39a3ee"));
        assert!(!is_digest_hex("xy39a3ee5e6b4b0d3255bfef95601890afd80709"));
    }
}
