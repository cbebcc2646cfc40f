//! Minimal PDF 1.4 writer.
//!
//! Objects are numbered from 1 in insertion order. `finish` lays them out
//! sequentially and emits a cross-reference table whose offsets point at the
//! first byte of each `N 0 obj` line.

use chrono::{DateTime, Utc};

use crate::assembly::segment::xref_entry;
use crate::render::{FontStyle, PageLines, TextLine};

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const MARGIN_LEFT: u32 = 50;
const MARGIN_TOP: u32 = 60;
const MARGIN_BOTTOM: u32 = 50;

/// Document information dictionary entries.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub subject: String,
    pub creator: String,
    pub created: DateTime<Utc>,
}

/// Accumulates indirect objects and serializes them with a valid xref table.
#[derive(Debug, Default)]
pub struct PdfWriter {
    objects: Vec<Option<Vec<u8>>>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an object number whose body is supplied later via `fill`.
    pub fn reserve(&mut self) -> usize {
        self.objects.push(None);
        self.objects.len()
    }

    pub fn add(&mut self, body: impl Into<Vec<u8>>) -> usize {
        self.objects.push(Some(body.into()));
        self.objects.len()
    }

    pub fn fill(&mut self, id: usize, body: impl Into<Vec<u8>>) {
        if let Some(slot) = self.objects.get_mut(id - 1) {
            *slot = Some(body.into());
        }
    }

    /// Adds an uncompressed stream object.
    pub fn add_stream(&mut self, data: &[u8]) -> usize {
        let mut body = format!("<< /Length {} >>\nstream\n", data.len()).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.add(body)
    }

    /// Serializes every object, the xref table and the trailer.
    ///
    /// Reserved objects that were never filled are written as `null`.
    pub fn finish(self, root: usize, info: Option<usize>) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(self.objects.len());
        for (index, body) in self.objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
            match body {
                Some(body) => out.extend_from_slice(body),
                None => out.extend_from_slice(b"null"),
            }
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", self.objects.len() + 1).as_bytes());
        out.extend_from_slice(xref_entry(0, 65535, false).as_bytes());
        for offset in &offsets {
            out.extend_from_slice(xref_entry(*offset, 0, true).as_bytes());
        }

        let info_ref = info
            .map(|id| format!(" /Info {} 0 R", id))
            .unwrap_or_default();
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {} 0 R{} >>\nstartxref\n{}\n%%EOF\n",
                self.objects.len() + 1,
                root,
                info_ref,
                xref_offset
            )
            .as_bytes(),
        );
        out
    }
}

/// Writes a text-only document with one page per entry in `pages`.
///
/// Uses the standard Helvetica faces, so no font data is embedded. Lines that
/// run past the bottom margin are dropped.
pub fn write_text_document(info: &DocumentInfo, pages: &[PageLines]) -> Vec<u8> {
    let mut pdf = PdfWriter::new();
    let catalog = pdf.reserve();
    let pages_id = pdf.reserve();
    let regular = pdf.add("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>");
    let bold = pdf.add("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>");

    let mut kids = Vec::with_capacity(pages.len());
    for lines in pages {
        let content = pdf.add_stream(&content_stream(lines));
        let page = pdf.add(format!(
            "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Contents {} 0 R \
             /Resources << /Font << /F1 {} 0 R /F2 {} 0 R >> >> >>",
            pages_id, PAGE_WIDTH, PAGE_HEIGHT, content, regular, bold
        ));
        kids.push(format!("{} 0 R", page));
    }

    pdf.fill(
        pages_id,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            kids.len()
        ),
    );
    pdf.fill(catalog, format!("<< /Type /Catalog /Pages {} 0 R >>", pages_id));

    let info_id = pdf.add(format!(
        "<< /Title {} /Author (Suntyn AI) /Subject {} /Creator {} /Producer (suntyn_tools {}) \
         /CreationDate {} >>",
        pdf_string(&info.title),
        pdf_string(&info.subject),
        pdf_string(&info.creator),
        env!("CARGO_PKG_VERSION"),
        pdf_string(&pdf_date(&info.created)),
    ));

    pdf.finish(catalog, Some(info_id))
}

fn content_stream(lines: &[TextLine]) -> Vec<u8> {
    let mut ops = String::from("BT\n");
    let mut y = PAGE_HEIGHT - MARGIN_TOP;
    let mut first = true;

    for line in lines {
        let advance = if first {
            0
        } else {
            u32::from(line.size) * 3 / 2 + u32::from(line.gap_before)
        };
        first = false;
        if y < MARGIN_BOTTOM + advance {
            break;
        }
        y -= advance;

        let font = match line.style {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
        };
        ops.push_str(&format!(
            "/{} {} Tf\n1 0 0 1 {} {} Tm\n{} Tj\n",
            font,
            line.size,
            MARGIN_LEFT,
            y,
            pdf_string(&line.text)
        ));
    }

    ops.push_str("ET");
    ops.into_bytes()
}

/// Wraps `text` in a PDF literal string, escaping delimiters.
///
/// Characters outside printable ASCII become `?` since the base-14 fonts are
/// used with their built-in encoding.
pub fn pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            ' '..='~' => out.push(ch),
            _ => out.push('?'),
        }
    }
    out.push(')');
    out
}

fn pdf_date(at: &DateTime<Utc>) -> String {
    at.format("D:%Y%m%d%H%M%SZ").to_string()
}
