use chrono::{DateTime, Utc};

use crate::assembly::UploadedFileInfo;

/// What the leading bytes of an upload look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedKind {
    Pdf,
    Png,
    Jpeg,
    Gif,
    Mp3,
    Mp4,
    Unknown,
}

impl SniffedKind {
    pub fn from_head(head: &[u8]) -> Self {
        if head.starts_with(b"%PDF") {
            SniffedKind::Pdf
        } else if head.starts_with(&[0x89, b'P', b'N', b'G']) {
            SniffedKind::Png
        } else if head.starts_with(&[0xFF, 0xD8, 0xFF]) {
            SniffedKind::Jpeg
        } else if head.starts_with(b"GIF8") {
            SniffedKind::Gif
        } else if head.starts_with(b"ID3") || head.starts_with(&[0xFF, 0xFB]) {
            SniffedKind::Mp3
        } else if head.len() >= 8 && &head[4..8] == b"ftyp" {
            SniffedKind::Mp4
        } else {
            SniffedKind::Unknown
        }
    }

    /// Short verdict shown in report summaries.
    pub fn label(&self) -> &'static str {
        match self {
            SniffedKind::Pdf => "Valid PDF",
            SniffedKind::Png | SniffedKind::Jpeg | SniffedKind::Gif => "Image file",
            SniffedKind::Mp3 => "Audio file",
            SniffedKind::Mp4 => "Video file",
            SniffedKind::Unknown => "Document",
        }
    }
}

/// Display facts about one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileFacts {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub pages: u32,
    /// `None` for placeholder entries that were never uploaded.
    pub kind: Option<SniffedKind>,
}

impl FileFacts {
    pub fn from_upload(upload: &UploadedFileInfo) -> Self {
        let kind = SniffedKind::from_head(upload.head());
        let pages = match kind {
            SniffedKind::Pdf => estimate_pdf_pages(&upload.data),
            _ => 1,
        };
        Self {
            name: upload.original_name.clone(),
            mime_type: upload.mime_type.clone(),
            size: upload.size,
            pages,
            kind: Some(kind),
        }
    }

    fn placeholder(name: &str, size: u64, pages: u32) -> Self {
        Self {
            name: name.to_string(),
            mime_type: "application/pdf".to_string(),
            size,
            pages,
            kind: None,
        }
    }
}

/// Everything a report template needs to know about a request.
#[derive(Debug, Clone)]
pub struct ReportFacts {
    pub tool_id: String,
    pub tool_name: String,
    pub files: Vec<FileFacts>,
    /// False when `files` holds the built-in placeholder documents.
    pub from_uploads: bool,
    pub generated_at: DateTime<Utc>,
}

impl ReportFacts {
    pub fn collect(
        tool_id: &str,
        tool_name: &str,
        uploads: &[UploadedFileInfo],
        generated_at: DateTime<Utc>,
    ) -> Self {
        let (files, from_uploads) = if uploads.is_empty() {
            (
                vec![
                    FileFacts::placeholder("Document_1.pdf", 125_000, 3),
                    FileFacts::placeholder("Document_2.pdf", 89_000, 2),
                ],
                false,
            )
        } else {
            (uploads.iter().map(FileFacts::from_upload).collect(), true)
        };

        Self {
            tool_id: tool_id.to_string(),
            tool_name: tool_name.to_string(),
            files,
            from_uploads,
            generated_at,
        }
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn total_pages(&self) -> u32 {
        self.files.iter().map(|f| f.pages.max(1)).sum()
    }
}

/// Counts `/Type /Page` dictionaries, falling back to one page per 50 KB.
pub fn estimate_pdf_pages(data: &[u8]) -> u32 {
    let mut count = 0u32;
    let mut pos = 0;
    while let Some(found) = find(&data[pos..], b"/Type") {
        let mut cursor = pos + found + b"/Type".len();
        while cursor < data.len() && data[cursor].is_ascii_whitespace() {
            cursor += 1;
        }
        let rest = &data[cursor..];
        if rest.starts_with(b"/Page") && rest.get(5) != Some(&b's') {
            count += 1;
        }
        pos = cursor;
    }

    if count > 0 {
        count
    } else {
        (data.len() / 50_000) as u32 + 1
    }
}

/// `bytes / 1024` with one decimal place.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn upload(name: &str, data: &'static [u8]) -> UploadedFileInfo {
        UploadedFileInfo::new(name, "application/octet-stream", Bytes::from_static(data))
    }

    #[test]
    fn placeholder_facts_when_nothing_uploaded() {
        let facts = ReportFacts::collect("pdf-merger", "PDF Merger", &[], Utc::now());
        assert!(!facts.from_uploads);
        assert_eq!(facts.files.len(), 2);
        assert_eq!(facts.files[0].name, "Document_1.pdf");
        assert_eq!(facts.total_size(), 214_000);
        assert_eq!(facts.total_pages(), 5);
    }

    #[test]
    fn sniffing_labels() {
        assert_eq!(SniffedKind::from_head(b"%PDF-1.7").label(), "Valid PDF");
        assert_eq!(
            SniffedKind::from_head(&[0x89, b'P', b'N', b'G', 0x0D]).label(),
            "Image file"
        );
        assert_eq!(SniffedKind::from_head(&[0xFF, 0xD8, 0xFF, 0xE0]).label(), "Image file");
        assert_eq!(SniffedKind::from_head(b"hello").label(), "Document");
    }

    #[test]
    fn page_estimate_counts_page_objects() {
        let pdf = b"%PDF-1.4 1 0 obj << /Type /Pages >> 2 0 obj << /Type /Page >> \
                    3 0 obj <</Type/Page>>";
        assert_eq!(estimate_pdf_pages(pdf), 2);
    }

    #[test]
    fn page_estimate_falls_back_to_size() {
        assert_eq!(estimate_pdf_pages(&[0u8; 10]), 1);
        assert_eq!(estimate_pdf_pages(&vec![0u8; 120_000]), 3);
    }

    #[test]
    fn uploads_are_sniffed() {
        let facts = ReportFacts::collect(
            "pdf-merger",
            "PDF Merger",
            &[upload("a.pdf", b"%PDF-1.4 << /Type /Page >>"), upload("b.txt", b"plain")],
            Utc::now(),
        );
        assert!(facts.from_uploads);
        assert_eq!(facts.files[0].kind, Some(SniffedKind::Pdf));
        assert_eq!(facts.files[0].pages, 1);
        assert_eq!(facts.files[1].kind, Some(SniffedKind::Unknown));
    }

    #[test]
    fn kilobytes_have_one_decimal() {
        assert_eq!(format_kb(125_000), "122.1 KB");
        assert_eq!(format_kb(0), "0.0 KB");
    }
}
