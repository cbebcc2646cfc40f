//! MP4 writer: `ftyp`, a `free` box with notes, then an `mdat` of filler.

use crate::assembly::segment::encode_box;

pub const DEFAULT_MDAT_BYTES: usize = 64 * 1024;
pub const MAX_MDAT_BYTES: usize = 8 * 1024 * 1024;

const MAJOR_BRAND: &[u8; 4] = b"isom";
const MINOR_VERSION: u32 = 0x200;
const COMPATIBLE_BRANDS: [&[u8; 4]; 4] = [b"isom", b"iso2", b"avc1", b"mp41"];

#[derive(Debug, Clone)]
pub struct VideoSpec {
    /// Free-form report text stored in the `free` box.
    pub notes: String,
    pub mdat_bytes: usize,
}

pub fn write_mp4(spec: &VideoSpec) -> Vec<u8> {
    let mdat_len = spec.mdat_bytes.min(MAX_MDAT_BYTES);

    let mut ftyp = Vec::with_capacity(24);
    ftyp.extend_from_slice(MAJOR_BRAND);
    ftyp.extend_from_slice(&MINOR_VERSION.to_be_bytes());
    for brand in COMPATIBLE_BRANDS {
        ftyp.extend_from_slice(brand);
    }

    let filler: Vec<u8> = (0..mdat_len).map(|i| (i % 251) as u8).collect();

    let mut out = encode_box(*b"ftyp", &ftyp);
    out.extend(encode_box(*b"free", spec.notes.as_bytes()));
    out.extend(encode_box(*b"mdat", &filler));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ftyp_box_leads_the_file() {
        let mp4 = write_mp4(&VideoSpec {
            notes: "n".to_string(),
            mdat_bytes: 16,
        });
        assert_eq!(&mp4[..4], &32u32.to_be_bytes());
        assert_eq!(&mp4[4..12], b"ftypisom");
        assert_eq!(&mp4[12..16], &[0, 0, 2, 0]);
        assert_eq!(&mp4[16..32], b"isomiso2avc1mp41");
    }

    #[test]
    fn boxes_tile_the_buffer() {
        let mp4 = write_mp4(&VideoSpec {
            notes: "video report".to_string(),
            mdat_bytes: 100,
        });
        let mut pos = 0;
        let mut tags = Vec::new();
        while pos < mp4.len() {
            let size = u32::from_be_bytes(mp4[pos..pos + 4].try_into().unwrap()) as usize;
            tags.push(mp4[pos + 4..pos + 8].to_vec());
            pos += size;
        }
        assert_eq!(pos, mp4.len());
        assert_eq!(tags, vec![b"ftyp".to_vec(), b"free".to_vec(), b"mdat".to_vec()]);
    }

    #[test]
    fn mdat_is_capped() {
        let mp4 = write_mp4(&VideoSpec {
            notes: String::new(),
            mdat_bytes: usize::MAX,
        });
        assert_eq!(mp4.len(), 32 + 8 + 8 + MAX_MDAT_BYTES);
    }
}
