//! Conflict marker assembly.

use bstr::ByteSlice;

/// Build the textual body for a conflicted path: both sides' raw content
/// verbatim between two distinct boundary markers. Each side is
/// newline-terminated before its closing marker so the markers always sit
/// on their own lines.
pub fn conflict_body(
    current: &[u8],
    incoming: &[u8],
    current_label: &str,
    incoming_label: &str,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(current.len() + incoming.len() + 64);
    body.extend_from_slice(format!("<<<<<<< {current_label}\n").as_bytes());
    push_terminated(&mut body, current);
    body.extend_from_slice(b"=======\n");
    push_terminated(&mut body, incoming);
    body.extend_from_slice(format!(">>>>>>> {incoming_label}\n").as_bytes());
    body
}

fn push_terminated(body: &mut Vec<u8>, content: &[u8]) {
    body.extend_from_slice(content);
    if !content.is_empty() && content.last_byte() != Some(b'\n') {
        body.push(b'\n');
    }
}
