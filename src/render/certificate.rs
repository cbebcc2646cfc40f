use chrono::{DateTime, Utc};

use crate::domain::validation::{mask_aadhaar, DocumentCheck};
use crate::render::{PageLines, TextLine};

fn verdict(passed: bool) -> &'static str {
    if passed {
        "PASSED"
    } else {
        "FAILED"
    }
}

/// Single-page validation certificate.
///
/// `masked` shows only the last four digits of the number.
pub fn certificate_lines(
    tool_name: &str,
    check: &DocumentCheck,
    masked: bool,
    generated_at: DateTime<Utc>,
    processing_id: &str,
) -> PageLines {
    let number = if masked {
        mask_aadhaar(&check.normalized)
    } else {
        check.normalized.clone()
    };

    vec![
        TextLine::title("GOVERNMENT DOCUMENT VALIDATION CERTIFICATE"),
        TextLine::heading(format!("Tool: {}", tool_name)),
        TextLine::body(format!("Document Type: {}", check.kind.label())),
        TextLine::body(format!("Document Number: {}", number)),
        TextLine::body(format!(
            "Validation Date: {}",
            generated_at.format("%Y-%m-%d")
        )),
        TextLine::body(format!(
            "Validation Time: {}",
            generated_at.format("%H:%M:%S UTC")
        )),
        TextLine::heading("VALIDATION RESULTS:"),
        TextLine::body(format!(
            "Status: {}",
            if check.is_valid() { "VALID" } else { "INVALID" }
        )),
        TextLine::body(format!("Format Check: {}", verdict(check.format_valid))),
        TextLine::body(format!(
            "Checksum Verification: {}",
            verdict(check.checksum_valid)
        )),
        TextLine::heading("This certificate was generated by Suntyn AI Government Validator"),
        TextLine::body(format!("Processing ID: {}", processing_id)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::{check_document, DocumentKind};

    fn text(lines: &PageLines) -> String {
        lines
            .iter()
            .map(|l| l.text.clone())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn valid_pan_certificate() {
        let check = check_document(DocumentKind::Pan, "ABCDE1234F");
        let body = text(&certificate_lines("PAN Validator", &check, false, Utc::now(), "ABCD"));
        assert!(body.contains("Status: VALID"));
        assert!(body.contains("Format Check: PASSED"));
        assert!(body.contains("Document Number: ABCDE1234F"));
        assert!(body.contains("Processing ID: ABCD"));
    }

    #[test]
    fn invalid_pan_certificate() {
        let check = check_document(DocumentKind::Pan, "1234ABCDEF");
        let body = text(&certificate_lines("PAN Validator", &check, false, Utc::now(), "ABCD"));
        assert!(body.contains("Status: INVALID"));
        assert!(body.contains("Format Check: FAILED"));
    }

    #[test]
    fn masked_numbers_hide_leading_digits() {
        let check = check_document(DocumentKind::Aadhaar, "234123412346");
        let body = text(&certificate_lines("Aadhaar Masker", &check, true, Utc::now(), "X"));
        assert!(body.contains("Document Number: XXXX XXXX 2346"));
        assert!(!body.contains("234123412346"));
    }
}
