//! The `"<kind> <byteLength>\0"` object header codec.

use crate::{ObjectError, ObjectKind};

/// Parse an object header from encoded bytes.
///
/// Returns `(kind, payload_length, header_length)` where `header_length`
/// includes the NUL separator. Bytes with no NUL separator, or with an
/// unrecognized kind token, are a corrupt object.
pub fn parse_header(data: &[u8]) -> Result<(ObjectKind, usize, usize), ObjectError> {
    let nul_pos = data
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| ObjectError::InvalidHeader("missing NUL separator".into()))?;

    let header = &data[..nul_pos];
    let space_pos = header
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| ObjectError::InvalidHeader("missing space between kind and length".into()))?;

    let kind = ObjectKind::from_bytes(&header[..space_pos])?;

    let len_str = std::str::from_utf8(&header[space_pos + 1..])
        .map_err(|_| ObjectError::InvalidHeader("non-ASCII length".into()))?;
    let payload_len: usize = len_str
        .parse()
        .map_err(|_| ObjectError::InvalidHeader(format!("invalid length: {len_str}")))?;

    Ok((kind, payload_len, nul_pos + 1))
}

/// Write an object header: `"<kind> <byteLength>\0"`.
pub fn write_header(kind: ObjectKind, payload_len: usize) -> Vec<u8> {
    format!("{} {}\0", kind, payload_len).into_bytes()
}

/// Encode a payload with its header in one step.
pub fn encode(kind: ObjectKind, payload: &[u8]) -> Vec<u8> {
    let mut out = write_header(kind, payload.len());
    out.extend_from_slice(payload);
    out
}
