//! Report content: pure functions from collected facts to lines, JSON
//! documents and text.

mod certificate;
pub mod developer;
mod facts;
mod lines;
mod report;

pub use certificate::certificate_lines;
pub use facts::{estimate_pdf_pages, format_kb, FileFacts, ReportFacts, SniffedKind};
pub use lines::{FontStyle, PageLines, TextLine};
pub use report::{compressed_size, report_pages};
