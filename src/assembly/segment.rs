//! Low-level segment encoding shared by the container writers.
//!
//! Every multi-byte integer written here is big-endian. CRC values are always
//! computed, never hard-coded.

use flate2::Crc;

/// CRC-32 (IEEE, reflected 0xEDB88320) over the concatenation of `parts`.
pub fn crc32(parts: &[&[u8]]) -> u32 {
    let mut crc = Crc::new();
    for part in parts {
        crc.update(part);
    }
    crc.sum()
}

/// Encodes a tagged segment: `len ‖ tag ‖ payload ‖ crc32(tag ‖ payload)`.
///
/// This is the PNG chunk layout. Payloads longer than `u32::MAX` are not
/// representable and get a truncated length field.
pub fn encode_segment(tag: [u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 12);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(&tag);
    out.extend_from_slice(payload);
    out.extend_from_slice(&crc32(&[&tag, payload]).to_be_bytes());
    out
}

/// Encodes an ISO base media box: `size ‖ tag ‖ payload`, where `size`
/// includes the 8-byte header.
pub fn encode_box(tag: [u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 8);
    out.extend_from_slice(&((payload.len() + 8) as u32).to_be_bytes());
    out.extend_from_slice(&tag);
    out.extend_from_slice(payload);
    out
}

/// Encodes an ID3v2.3 frame: `id ‖ size ‖ flags(0,0) ‖ payload`.
///
/// v2.3 frame sizes are plain big-endian integers; only the tag header uses
/// the synchsafe form.
pub fn encode_id3_frame(id: [u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 10);
    out.extend_from_slice(&id);
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(&[0, 0]);
    out.extend_from_slice(payload);
    out
}

/// Converts `n` (at most 28 bits) to the 4-byte synchsafe form used by the
/// ID3v2 tag header.
pub fn synchsafe(n: u32) -> [u8; 4] {
    [
        ((n >> 21) & 0x7f) as u8,
        ((n >> 14) & 0x7f) as u8,
        ((n >> 7) & 0x7f) as u8,
        (n & 0x7f) as u8,
    ]
}

/// One line of a PDF cross-reference table. Always exactly 20 bytes.
pub fn xref_entry(offset: usize, generation: u16, in_use: bool) -> String {
    let kind = if in_use { 'n' } else { 'f' };
    format!("{:010} {:05} {} \n", offset, generation, kind)
}

/// Maps a character to its Latin-1 byte; NUL and anything outside Latin-1
/// become `?`.
pub fn latin1(ch: char) -> u8 {
    match u8::try_from(u32::from(ch)) {
        Ok(0) | Err(_) => b'?',
        Ok(byte) => byte,
    }
}
