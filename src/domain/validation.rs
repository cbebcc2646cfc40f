//! Format and checksum validation for Indian government identity documents.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

static PAN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]{1}$").expect("Invalid PAN regex"));

static GSTIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z]{1}[1-9A-Z]{1}Z[0-9A-Z]{1}$")
        .expect("Invalid GSTIN regex")
});

static AADHAAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[2-9][0-9]{11}$").expect("Invalid Aadhaar regex"));

static PASSPORT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][0-9]{7}$").expect("Invalid passport regex"));

static VOTER_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}[0-9]{7}$").expect("Invalid voter id regex"));

static GENERIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{10,12}$").expect("Invalid document regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pan,
    Gstin,
    Aadhaar,
    Passport,
    VoterId,
    Generic,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Pan => "PAN Card",
            DocumentKind::Gstin => "GST Registration",
            DocumentKind::Aadhaar => "Aadhaar Card",
            DocumentKind::Passport => "Passport",
            DocumentKind::VoterId => "Voter ID",
            DocumentKind::Generic => "Government Document",
        }
    }

    /// Document number used when a request does not supply one.
    pub fn sample_number(&self) -> &'static str {
        match self {
            DocumentKind::Pan => "ABCDE1234F",
            DocumentKind::Gstin => "27AAPFU0939F1ZV",
            DocumentKind::Aadhaar => "234123412346",
            DocumentKind::Passport => "A1234567",
            DocumentKind::VoterId => "ABC1234567",
            DocumentKind::Generic => "SAMPLE123456",
        }
    }
}

/// Outcome of validating one document number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCheck {
    pub kind: DocumentKind,
    pub normalized: String,
    pub format_valid: bool,
    /// Always equal to `format_valid` for kinds without a check digit.
    pub checksum_valid: bool,
}

impl DocumentCheck {
    pub fn is_valid(&self) -> bool {
        self.format_valid && self.checksum_valid
    }
}

/// Trims and upper-cases `raw`; Aadhaar numbers also lose inner whitespace.
pub fn normalize_document_number(kind: DocumentKind, raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    match kind {
        DocumentKind::Aadhaar => upper
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect(),
        _ => upper,
    }
}

pub fn check_document(kind: DocumentKind, raw: &str) -> DocumentCheck {
    let normalized = normalize_document_number(kind, raw);
    let format_valid = match kind {
        DocumentKind::Pan => PAN_REGEX.is_match(&normalized),
        DocumentKind::Gstin => GSTIN_REGEX.is_match(&normalized),
        DocumentKind::Aadhaar => AADHAAR_REGEX.is_match(&normalized),
        DocumentKind::Passport => PASSPORT_REGEX.is_match(&normalized),
        DocumentKind::VoterId => VOTER_ID_REGEX.is_match(&normalized),
        DocumentKind::Generic => GENERIC_REGEX.is_match(&normalized),
    };

    let checksum_valid = format_valid
        && match kind {
            DocumentKind::Aadhaar => verhoeff_valid(&normalized),
            DocumentKind::Gstin => gstin_checksum_valid(&normalized),
            _ => true,
        };

    DocumentCheck {
        kind,
        normalized,
        format_valid,
        checksum_valid,
    }
}

/// Replaces all but the last four digits with `X`, grouped in fours.
pub fn mask_aadhaar(normalized: &str) -> String {
    let visible_from = normalized.len().saturating_sub(4);
    let masked: Vec<char> = normalized
        .chars()
        .enumerate()
        .map(|(i, c)| if i < visible_from { 'X' } else { c })
        .collect();
    masked
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

const VERHOEFF_D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

const VERHOEFF_P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 8, 7, 6, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

/// Verhoeff check over a digit string whose last digit is the check digit.
pub fn verhoeff_valid(digits: &str) -> bool {
    let mut check = 0usize;
    for (i, ch) in digits.chars().rev().enumerate() {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };
        let permuted = VERHOEFF_P[i % 8][digit as usize];
        check = VERHOEFF_D[check][permuted as usize] as usize;
    }
    !digits.is_empty() && check == 0
}

/// GSTIN check character: base-36 weighted sum over the first 14 characters.
pub fn gstin_checksum_valid(gstin: &str) -> bool {
    const CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let chars: Vec<char> = gstin.chars().collect();
    if chars.len() != 15 {
        return false;
    }

    let mut sum = 0u32;
    for (i, ch) in chars[..14].iter().enumerate() {
        let Some(value) = CHARSET.find(*ch) else {
            return false;
        };
        let product = value as u32 * (i as u32 % 2 + 1);
        sum += product / 36 + product % 36;
    }
    let expected = (36 - sum % 36) % 36;
    CHARSET.chars().nth(expected as usize) == Some(chars[14])
}
