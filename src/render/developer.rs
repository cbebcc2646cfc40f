//! Text transformations and report documents behind the developer tools.
//!
//! Malformed input never produces an error here: the returned document
//! carries an error object instead.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};

use crate::render::facts::{format_kb, FileFacts, ReportFacts};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex"));
static BETWEEN_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s+<").expect("Invalid regex"));
static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("Invalid regex"));
static LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*//.*$").expect("Invalid regex"));
static CSS_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*([{}:;,>])\s*").expect("Invalid regex"));

const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{};:,.?";

const LOREM_SENTENCES: [&str; 8] = [
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
    "Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
    "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris.",
    "Nisi ut aliquip ex ea commodo consequat.",
    "Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore.",
    "Eu fugiat nulla pariatur, excepteur sint occaecat cupidatat non proident.",
    "Sunt in culpa qui officia deserunt mollit anim id est laborum.",
    "Curabitur pretium tincidunt lacus, nulla gravida orci a odio.",
];

fn report_metadata(
    tool_name: &str,
    source: Option<&FileFacts>,
    input_len: usize,
    generated_at: DateTime<Utc>,
) -> Value {
    let input_source = match source {
        Some(file) => json!({
            "filename": file.name,
            "size": file.size,
            "type": file.mime_type,
        }),
        None => json!("direct_input"),
    };
    json!({
        "tool": tool_name,
        "processor": "Suntyn AI",
        "processed_at": generated_at.to_rfc3339(),
        "input_source": input_source,
        "input_size_bytes": input_len,
    })
}

fn error_object(error: &str, original: &str, suggestion: &str) -> Value {
    json!({
        "error": error,
        "original": original,
        "suggestion": suggestion,
    })
}

/// Nesting depth: scalars are 0, each array/object level adds one.
pub fn json_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(json_depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(json_depth).max().unwrap_or(0),
        _ => 0,
    }
}

/// Total number of object keys at every level.
pub fn property_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.iter().map(property_count).sum(),
        Value::Object(map) => map.len() + map.values().map(property_count).sum::<usize>(),
        _ => 0,
    }
}

/// Validates and pretty-prints `input` inside a report wrapper.
pub fn json_formatter_report(
    tool_name: &str,
    input: &str,
    source: Option<&FileFacts>,
    generated_at: DateTime<Utc>,
) -> Value {
    let metadata = report_metadata(tool_name, source, input.len(), generated_at);

    match serde_json::from_str::<Value>(input) {
        Ok(parsed) => {
            let formatted = serde_json::to_string_pretty(&parsed).unwrap_or_default();
            json!({
                "metadata": metadata,
                "validation_results": {
                    "syntax_valid": true,
                    "structure_verified": true,
                    "encoding": "UTF-8",
                },
                "technical_analysis": {
                    "depth_level": json_depth(&parsed),
                    "total_properties": property_count(&parsed),
                },
                "formatted": formatted,
                "processed_data": parsed,
            })
        }
        Err(e) => json!({
            "metadata": metadata,
            "validation_results": {
                "syntax_valid": false,
                "structure_verified": false,
                "encoding": "UTF-8",
            },
            "error": format!("Invalid JSON format: {}", e),
            "processed_data": error_object(
                "Invalid JSON format",
                input,
                "Please provide valid JSON syntax",
            ),
        }),
    }
}

/// Splits one CSV record, honouring double-quoted fields.
pub fn parse_csv_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// First record is the header row; every later record becomes an object.
pub fn csv_to_json_report(
    tool_name: &str,
    input: &str,
    source: Option<&FileFacts>,
    generated_at: DateTime<Utc>,
) -> Value {
    let mut records = input.lines().filter(|l| !l.trim().is_empty());
    let headers = records.next().map(parse_csv_record).unwrap_or_default();

    let rows: Vec<Value> = records
        .map(|line| {
            let mut row = Map::new();
            for (index, value) in parse_csv_record(line).into_iter().enumerate() {
                let key = headers
                    .get(index)
                    .map(|h| h.trim().to_string())
                    .unwrap_or_else(|| format!("column_{}", index + 1));
                row.insert(key, Value::String(value));
            }
            Value::Object(row)
        })
        .collect();

    json!({
        "metadata": report_metadata(tool_name, source, input.len(), generated_at),
        "technical_analysis": {
            "row_count": rows.len(),
            "column_count": headers.len(),
        },
        "processed_data": rows,
    })
}

fn csv_field(value: &Value) -> String {
    let raw = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw
    }
}

/// Flattens a JSON array of objects (or a single object) into CSV.
///
/// Columns follow first-seen key order. Input that is not JSON yields a
/// one-column `error` table.
pub fn json_to_csv(input: &str) -> String {
    let parsed = match serde_json::from_str::<Value>(input) {
        Ok(value) => value,
        Err(e) => {
            return format!(
                "error\n{}\n",
                csv_field(&Value::String(format!("Invalid JSON format: {}", e)))
            )
        }
    };

    let rows = match parsed {
        Value::Array(items) => items,
        other => vec![other],
    };

    let mut headers: Vec<String> = Vec::new();
    for row in &rows {
        match row {
            Value::Object(map) => {
                for key in map.keys() {
                    if !headers.contains(key) {
                        headers.push(key.clone());
                    }
                }
            }
            _ => {
                if !headers.iter().any(|h| h == "value") {
                    headers.push("value".to_string());
                }
            }
        }
    }

    let mut out = headers
        .iter()
        .map(|h| csv_field(&Value::String(h.clone())))
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');

    for row in &rows {
        let fields: Vec<String> = headers
            .iter()
            .map(|header| match row {
                Value::Object(map) => map.get(header).map(csv_field).unwrap_or_default(),
                scalar if header == "value" => csv_field(scalar),
                _ => String::new(),
            })
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Re-indents markup with one node per line and two spaces per level.
pub fn format_xml(input: &str) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    let mut rest = input.trim();

    while !rest.is_empty() {
        let (token, remainder) = if rest.starts_with('<') {
            match rest.find('>') {
                Some(end) => rest.split_at(end + 1),
                None => (rest, ""),
            }
        } else {
            match rest.find('<') {
                Some(start) => rest.split_at(start),
                None => (rest, ""),
            }
        };
        rest = remainder;

        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let closing = token.starts_with("</");
        let standalone = token.ends_with("/>")
            || token.starts_with("<?")
            || token.starts_with("<!")
            || !token.starts_with('<');

        if closing {
            depth = depth.saturating_sub(1);
        }
        out.push_str(&"  ".repeat(depth));
        out.push_str(token);
        out.push('\n');
        if !closing && !standalone {
            depth += 1;
        }
    }
    out
}

pub fn minify_html(input: &str) -> String {
    let collapsed = WHITESPACE.replace_all(input, " ");
    BETWEEN_TAGS.replace_all(&collapsed, "><").trim().to_string()
}

pub fn minify_css(input: &str) -> String {
    let without_comments = BLOCK_COMMENT.replace_all(input, "");
    let collapsed = WHITESPACE.replace_all(&without_comments, " ");
    CSS_PUNCTUATION
        .replace_all(&collapsed, "$1")
        .replace(";}", "}")
        .trim()
        .to_string()
}

/// Drops comments and indentation but keeps line breaks, so statements that
/// rely on automatic semicolon insertion still parse.
pub fn minify_js(input: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(input, "");
    let without_lines = LINE_COMMENT.replace_all(&without_blocks, "");
    without_lines
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Percentage saved; zero for empty input.
pub fn savings_percent(original: usize, minified: usize) -> f64 {
    if original == 0 {
        0.0
    } else {
        (1.0 - minified as f64 / original as f64) * 100.0
    }
}

pub fn markdown_to_html(title: &str, input: &str) -> String {
    let parser = pulldown_cmark::Parser::new(input);
    let mut body = String::new();
    pulldown_cmark::html::push_html(&mut body, parser);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_xml(title),
        body
    )
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

const QR_MODULES: usize = 21;
const QR_SCALE: usize = 10;
const QR_MARGIN: usize = 20;

fn in_finder(row: usize, col: usize) -> Option<bool> {
    let corners = [(0, 0), (0, QR_MODULES - 7), (QR_MODULES - 7, 0)];
    for (top, left) in corners {
        if (top..top + 7).contains(&row) && (left..left + 7).contains(&col) {
            let r = row - top;
            let c = col - left;
            let ring = r == 0 || r == 6 || c == 0 || c == 6;
            let core = (2..=4).contains(&r) && (2..=4).contains(&c);
            return Some(ring || core);
        }
    }
    None
}

/// Placeholder QR-style SVG. Finder squares are fixed; data modules come from
/// the SHA-256 of `text`, so the same input always draws the same picture.
pub fn qr_svg(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let size = QR_MODULES * QR_SCALE + QR_MARGIN * 2;
    let mut rects = String::new();
    let mut bit = 0usize;

    for row in 0..QR_MODULES {
        for col in 0..QR_MODULES {
            let dark = match in_finder(row, col) {
                Some(dark) => dark,
                None => {
                    let byte = digest[(bit / 8) % digest.len()];
                    let on = (byte >> (bit % 8)) & 1 == 1;
                    bit += 1;
                    on
                }
            };
            if dark {
                rects.push_str(&format!(
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"black\"/>",
                    QR_MARGIN + col * QR_SCALE,
                    QR_MARGIN + row * QR_SCALE,
                    QR_SCALE,
                    QR_SCALE
                ));
            }
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg width=\"{size}\" height=\"{size}\" xmlns=\"http://www.w3.org/2000/svg\">\n\
         <title>{}</title>\n\
         <rect width=\"{size}\" height=\"{size}\" fill=\"white\"/>\n\
         {}\n</svg>\n",
        escape_xml(text),
        rects,
    )
}

/// Bar pattern drawn from the bits of `text` (first 40 bytes).
pub fn barcode_svg(text: &str) -> String {
    let mut bars = String::new();
    let mut x = 10usize;
    for byte in text.bytes().take(40) {
        for shift in (0..8).rev() {
            let width = if (byte >> shift) & 1 == 1 { 3 } else { 1 };
            bars.push_str(&format!(
                "<rect x=\"{}\" y=\"10\" width=\"{}\" height=\"80\" fill=\"black\"/>",
                x, width
            ));
            x += width + 2;
        }
    }
    let width = x + 10;
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <svg width=\"{width}\" height=\"120\" xmlns=\"http://www.w3.org/2000/svg\">\n\
         <rect width=\"{width}\" height=\"120\" fill=\"white\"/>\n{}\n\
         <text x=\"{}\" y=\"110\" text-anchor=\"middle\" font-family=\"monospace\" \
         font-size=\"12\">{}</text>\n</svg>\n",
        bars,
        width / 2,
        escape_xml(text),
    )
}

pub fn lorem_ipsum(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|p| {
            (0..5)
                .map(|s| LOREM_SENTENCES[(p * 3 + s) % LOREM_SENTENCES.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn generate_passwords<R: Rng>(rng: &mut R, length: usize, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            (0..length)
                .map(|_| PASSWORD_CHARSET[rng.random_range(0..PASSWORD_CHARSET.len())] as char)
                .collect()
        })
        .collect()
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Lists every match of `pattern` in `text` with capture groups.
pub fn regex_report(
    tool_name: &str,
    pattern: &str,
    text: &str,
    generated_at: DateTime<Utc>,
) -> Value {
    let metadata = report_metadata(tool_name, None, text.len(), generated_at);
    let regex = match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(e) => {
            return json!({
                "metadata": metadata,
                "error": format!("Invalid regular expression: {}", e),
                "processed_data": error_object(
                    "Invalid regular expression",
                    pattern,
                    "Check the pattern syntax",
                ),
            })
        }
    };

    let matches: Vec<Value> = regex
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let groups: Vec<Value> = caps
                .iter()
                .skip(1)
                .map(|g| g.map(|m| Value::String(m.as_str().to_string())).unwrap_or(Value::Null))
                .collect();
            Some(json!({
                "match": whole.as_str(),
                "start": whole.start(),
                "end": whole.end(),
                "groups": groups,
            }))
        })
        .collect();

    json!({
        "metadata": metadata,
        "processed_data": {
            "pattern": pattern,
            "match_count": matches.len(),
            "matches": matches,
        },
    })
}

/// Parses unix seconds, unix milliseconds or RFC 3339 text.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(number) = trimmed.parse::<i64>() {
        return if number.abs() >= 100_000_000_000 {
            DateTime::from_timestamp_millis(number)
        } else {
            DateTime::from_timestamp(number, 0)
        };
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn timestamp_report(tool_name: &str, input: &str, generated_at: DateTime<Utc>) -> Value {
    let metadata = report_metadata(tool_name, None, input.len(), generated_at);
    match parse_timestamp(input) {
        Some(at) => json!({
            "metadata": metadata,
            "processed_data": {
                "input": input.trim(),
                "unix_seconds": at.timestamp(),
                "unix_millis": at.timestamp_millis(),
                "iso8601": at.to_rfc3339(),
                "rfc2822": at.to_rfc2822(),
                "day_of_week": at.format("%A").to_string(),
            },
        }),
        None => json!({
            "metadata": metadata,
            "error": "Unrecognized timestamp",
            "processed_data": error_object(
                "Unrecognized timestamp",
                input,
                "Use unix seconds, unix milliseconds or RFC 3339",
            ),
        }),
    }
}

/// Plain-text summary used by tools without a dedicated transformation.
pub fn text_report(facts: &ReportFacts, input: &str, processing_id: &str) -> String {
    let mut out = format!(
        "{} - PROCESSING REPORT\n{}\nGenerated: {}\nProcessing ID: {}\n\nINPUT SUMMARY\n",
        facts.tool_name.to_uppercase(),
        "=".repeat(40),
        facts.generated_at.to_rfc3339(),
        processing_id,
    );
    out.push_str(&format!("Characters: {}\n", input.chars().count()));
    out.push_str(&format!("Words: {}\n", input.split_whitespace().count()));
    out.push_str(&format!("Lines: {}\n\nFILES\n", input.lines().count()));

    if facts.from_uploads {
        for (index, file) in facts.files.iter().enumerate() {
            let verdict = file.kind.map(|k| k.label()).unwrap_or("Document");
            out.push_str(&format!(
                "{}. {} - {} ({})\n",
                index + 1,
                file.name,
                format_kb(file.size),
                verdict
            ));
        }
    } else {
        out.push_str("No files uploaded\n");
    }
    out
}
