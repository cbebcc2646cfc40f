//! Property-based tests using proptest
//!
//! Invariants of the byte-level writers and the document validators that
//! must hold for every input, not just the hand-picked ones.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use suntyn_tools::assembly::pdf::{write_text_document, DocumentInfo};
use suntyn_tools::assembly::png::{write_png, ColorMode, ImageSpec};
use suntyn_tools::assembly::segment::{crc32, encode_segment, synchsafe, xref_entry};
use suntyn_tools::domain::validation::{
    check_document, mask_aadhaar, normalize_document_number, DocumentKind,
};
use suntyn_tools::render::TextLine;

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Walks PNG chunks after the signature and returns `(tag, crc_ok)` pairs
fn png_chunks(bytes: &[u8]) -> Vec<([u8; 4], bool)> {
    let mut chunks = Vec::new();
    let mut pos = 8;
    while pos + 12 <= bytes.len() {
        let len = u32::from_be_bytes(bytes[pos..pos + 4].try_into().unwrap()) as usize;
        let tag: [u8; 4] = bytes[pos + 4..pos + 8].try_into().unwrap();
        let payload = &bytes[pos + 8..pos + 8 + len];
        let stored = u32::from_be_bytes(bytes[pos + 8 + len..pos + 12 + len].try_into().unwrap());
        chunks.push((tag, stored == crc32(&[&tag, payload])));
        pos += 12 + len;
    }
    chunks
}

/// Strategy for document text that includes non-Latin-1 characters
fn line_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..60).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn crc_is_independent_of_how_input_is_split(
        data in prop::collection::vec(any::<u8>(), 0..512),
        split in any::<prop::sample::Index>(),
    ) {
        let at = split.index(data.len() + 1);
        let (head, tail) = data.split_at(at);
        prop_assert_eq!(crc32(&[head, tail]), crc32(&[&data]));
    }

    #[test]
    fn segment_layout_holds_for_any_payload(
        tag in any::<[u8; 4]>(),
        payload in prop::collection::vec(any::<u8>(), 0..1024),
    ) {
        let segment = encode_segment(tag, &payload);

        prop_assert_eq!(segment.len(), payload.len() + 12);
        prop_assert_eq!(&segment[0..4], &(payload.len() as u32).to_be_bytes());
        prop_assert_eq!(&segment[4..8], &tag);
        prop_assert_eq!(&segment[8..8 + payload.len()], payload.as_slice());
        let crc = u32::from_be_bytes(segment[segment.len() - 4..].try_into().unwrap());
        prop_assert_eq!(crc, crc32(&[&tag, &payload]));
    }

    #[test]
    fn synchsafe_bytes_never_set_high_bit(n in 0u32..(1 << 28)) {
        let bytes = synchsafe(n);
        prop_assert!(bytes.iter().all(|b| b & 0x80 == 0));

        let decoded = bytes
            .iter()
            .fold(0u32, |acc, b| (acc << 7) | u32::from(*b));
        prop_assert_eq!(decoded, n);
    }

    #[test]
    fn xref_entries_are_twenty_bytes(
        offset in 0usize..10_000_000_000,
        generation in any::<u16>(),
        in_use in any::<bool>(),
    ) {
        let entry = xref_entry(offset, generation, in_use);
        prop_assert_eq!(entry.len(), 20);
        prop_assert!(entry.ends_with(" \n"));
    }

    #[test]
    fn png_chunks_all_carry_valid_crcs(
        width in 1u32..48,
        height in 1u32..48,
        alpha in any::<bool>(),
    ) {
        let color = if alpha { ColorMode::Rgba } else { ColorMode::Rgb };
        let bytes = write_png(&ImageSpec::clamped(width, height, color)).unwrap();

        prop_assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        let chunks = png_chunks(&bytes);
        prop_assert_eq!(&chunks.first().unwrap().0, b"IHDR");
        prop_assert_eq!(&chunks.last().unwrap().0, b"IEND");
        prop_assert!(chunks.iter().all(|(_, ok)| *ok));
    }

    #[test]
    fn pdf_startxref_points_at_xref_for_any_text(
        lines in prop::collection::vec(line_text_strategy(), 0..30),
    ) {
        let info = DocumentInfo {
            title: "Report (draft)".to_string(),
            subject: "Property check".to_string(),
            creator: "Suntyn".to_string(),
            created: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };
        let page: Vec<TextLine> = lines.into_iter().map(TextLine::body).collect();
        let bytes = write_text_document(&info, &[page]);

        prop_assert!(bytes.starts_with(b"%PDF-1."));
        prop_assert!(bytes.ends_with(b"%%EOF\n"));

        let start = find(&bytes, b"startxref\n").unwrap() + "startxref\n".len();
        let end = start + bytes[start..].iter().position(|b| *b == b'\n').unwrap();
        let xref_offset: usize = std::str::from_utf8(&bytes[start..end]).unwrap().parse().unwrap();
        prop_assert!(bytes[xref_offset..].starts_with(b"xref\n"));
    }

    #[test]
    fn normalization_is_idempotent(raw in "[ a-zA-Z0-9-]{0,24}") {
        for kind in [
            DocumentKind::Pan,
            DocumentKind::Gstin,
            DocumentKind::Aadhaar,
            DocumentKind::VoterId,
        ] {
            let once = normalize_document_number(kind, &raw);
            prop_assert_eq!(normalize_document_number(kind, &once), once.clone());
            prop_assert_eq!(once.trim(), once.as_str());
            prop_assert_eq!(once.to_uppercase(), once.clone());
        }
    }

    #[test]
    fn well_formed_pan_always_validates(
        letters in "[A-Z]{5}",
        digits in "[0-9]{4}",
        last in "[A-Z]",
        pad in " {0,3}",
    ) {
        let raw = format!("{pad}{}{}{}{pad}", letters.to_lowercase(), digits, last);
        let check = check_document(DocumentKind::Pan, &raw);
        prop_assert!(check.is_valid());
        prop_assert_eq!(check.normalized, format!("{}{}{}", letters, digits, last));
    }

    #[test]
    fn aadhaar_mask_keeps_only_last_four(digits in "[2-9][0-9]{11}") {
        let masked = mask_aadhaar(&digits);
        prop_assert_eq!(masked.len(), 14);
        prop_assert!(masked.starts_with("XXXX XXXX "));
        prop_assert_eq!(&masked[10..], &digits[8..]);
    }

    #[test]
    fn checksum_never_passes_without_format(raw in ".{0,20}") {
        for kind in [DocumentKind::Aadhaar, DocumentKind::Gstin] {
            let check = check_document(kind, &raw);
            if !check.format_valid {
                prop_assert!(!check.checksum_valid);
                prop_assert!(!check.is_valid());
            }
        }
    }
}
