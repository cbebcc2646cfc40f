//! Assemblers for the developer text tools.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

use crate::assembly::{
    AssembledOutput, AssemblyContext, AssemblyError, ToolOptions, UploadedFileInfo,
};
use crate::catalog::{DeveloperTool, ToolDescriptor};
use crate::render::developer as dev;
use crate::render::{FileFacts, ReportFacts};

const INPUT_KEYS: [&str; 4] = ["text", "input", "content", "data"];

const DEFAULT_PASSWORD_LENGTH: u32 = 16;
const DEFAULT_PASSWORD_COUNT: u32 = 5;
const DEFAULT_LOREM_PARAGRAPHS: u32 = 3;

fn pretty(value: &Value) -> Result<Vec<u8>, AssemblyError> {
    Ok(serde_json::to_vec_pretty(value)?)
}

fn minified(comment_open: &str, comment_close: &str, original: &str, output: String) -> Vec<u8> {
    format!(
        "{} Minified by Suntyn AI: {} bytes -> {} bytes ({:.1}% smaller) {}\n{}",
        comment_open,
        original.len(),
        output.len(),
        dev::savings_percent(original.len(), output.len()),
        comment_close,
        output
    )
    .into_bytes()
}

pub(super) fn developer(
    tool: &ToolDescriptor,
    kind: DeveloperTool,
    files: &[UploadedFileInfo],
    options: &ToolOptions,
    ctx: &AssemblyContext,
) -> Result<AssembledOutput, AssemblyError> {
    let source = files.first();
    let source_facts = source.map(FileFacts::from_upload);
    let input = match source {
        Some(file) => String::from_utf8_lossy(&file.data).into_owned(),
        None => options.first_text(&INPUT_KEYS).unwrap_or_default(),
    };
    let raw_bytes: &[u8] = source.map(|f| f.data.as_ref()).unwrap_or(input.as_bytes());

    let (bytes, metadata) = match kind {
        DeveloperTool::JsonFormatter => {
            let input = if input.trim().is_empty() { "{}" } else { input.as_str() };
            let report =
                dev::json_formatter_report(tool.name, input, source_facts.as_ref(), ctx.generated_at);
            let valid = report.get("formatted").is_some();
            (pretty(&report)?, json!({ "valid": valid }))
        }
        DeveloperTool::XmlFormatter => {
            let formatted = dev::format_xml(&input);
            let lines = formatted.lines().count();
            (formatted.into_bytes(), json!({ "lines": lines }))
        }
        DeveloperTool::CsvToJson => {
            let report =
                dev::csv_to_json_report(tool.name, &input, source_facts.as_ref(), ctx.generated_at);
            let rows = report["technical_analysis"]["row_count"].clone();
            (pretty(&report)?, json!({ "rowCount": rows }))
        }
        DeveloperTool::JsonToCsv => {
            let csv = dev::json_to_csv(&input);
            let rows = csv.lines().count().saturating_sub(1);
            (csv.into_bytes(), json!({ "rowCount": rows }))
        }
        DeveloperTool::Base64Encoder => base64_output(source, &input, raw_bytes, options),
        DeveloperTool::UrlEncoder => {
            let encoded: String = url::form_urlencoded::byte_serialize(input.as_bytes()).collect();
            let length = encoded.len();
            (encoded.into_bytes(), json!({ "encodedLength": length }))
        }
        DeveloperTool::HashGenerator => {
            let digest = dev::sha256_hex(raw_bytes);
            let body = format!(
                "{} - HASH REPORT\nAlgorithm: SHA-256\nInput bytes: {}\nSHA-256: {}\n",
                tool.name.to_uppercase(),
                raw_bytes.len(),
                digest
            );
            (body.into_bytes(), json!({ "algorithm": "SHA-256", "digest": digest }))
        }
        DeveloperTool::PasswordGenerator => {
            let length = options
                .u32("length")?
                .unwrap_or(DEFAULT_PASSWORD_LENGTH)
                .clamp(8, 128);
            let count = options
                .u32("count")?
                .unwrap_or(DEFAULT_PASSWORD_COUNT)
                .clamp(1, 20);
            let passwords =
                dev::generate_passwords(&mut rand::rng(), length as usize, count as usize);
            let mut body = passwords.join("\n");
            body.push('\n');
            (body.into_bytes(), json!({ "length": length, "count": count }))
        }
        DeveloperTool::QrCode => {
            let payload = options
                .first_text(&["url"])
                .or_else(|| (!input.is_empty()).then(|| input.clone()))
                .unwrap_or_else(|| "https://suntyn.ai".to_string());
            let svg = dev::qr_svg(&payload);
            (svg.into_bytes(), json!({ "encoded": payload }))
        }
        DeveloperTool::Barcode => {
            let payload = if input.is_empty() { "SUNTYN" } else { input.as_str() };
            let svg = dev::barcode_svg(payload);
            (svg.into_bytes(), json!({ "encoded": payload }))
        }
        DeveloperTool::HtmlMinifier => {
            let output = dev::minify_html(&input);
            let size = output.len();
            (minified("<!--", "-->", &input, output), json!({ "minifiedSize": size }))
        }
        DeveloperTool::CssMinifier => {
            let output = dev::minify_css(&input);
            let size = output.len();
            (minified("/*", "*/", &input, output), json!({ "minifiedSize": size }))
        }
        DeveloperTool::JsMinifier => {
            let output = dev::minify_js(&input);
            let size = output.len();
            (minified("/*", "*/", &input, output), json!({ "minifiedSize": size }))
        }
        DeveloperTool::MarkdownToHtml => {
            let title = source
                .map(|f| f.original_name.as_str())
                .unwrap_or(tool.name);
            let html = dev::markdown_to_html(title, &input);
            (html.into_bytes(), json!({ "title": title }))
        }
        DeveloperTool::LoremIpsum => {
            let paragraphs = options
                .u32("paragraphs")?
                .unwrap_or(DEFAULT_LOREM_PARAGRAPHS)
                .clamp(1, 20);
            let text = dev::lorem_ipsum(paragraphs as usize);
            (text.into_bytes(), json!({ "paragraphs": paragraphs }))
        }
        DeveloperTool::RegexTester => {
            let pattern = options
                .text("pattern")
                .unwrap_or_else(|| r"\w+".to_string());
            let report = dev::regex_report(tool.name, &pattern, &input, ctx.generated_at);
            let count = report["processed_data"]["match_count"].clone();
            (pretty(&report)?, json!({ "matchCount": count }))
        }
        DeveloperTool::TimestampConverter => {
            let value = options
                .text("timestamp")
                .or_else(|| (!input.is_empty()).then(|| input.clone()))
                .unwrap_or_else(|| ctx.generated_at.timestamp().to_string());
            let report = dev::timestamp_report(tool.name, &value, ctx.generated_at);
            let valid = report.get("error").is_none();
            (pretty(&report)?, json!({ "valid": valid }))
        }
        DeveloperTool::TextReport => {
            let facts = ReportFacts::collect(tool.id, tool.name, files, ctx.generated_at);
            let report = dev::text_report(&facts, &input, &ctx.processing_id);
            (report.into_bytes(), json!({ "characters": input.chars().count() }))
        }
    };

    Ok(AssembledOutput {
        format: kind.output_format(),
        bytes,
        metadata,
    })
}

/// Encodes the upload (or text input); `mode=decode` reverses it.
///
/// Image uploads are emitted as a `data:` URI.
fn base64_output(
    source: Option<&UploadedFileInfo>,
    input: &str,
    raw_bytes: &[u8],
    options: &ToolOptions,
) -> (Vec<u8>, Value) {
    if options.text("mode").as_deref() == Some("decode") {
        return match STANDARD.decode(input.trim()) {
            Ok(decoded) => {
                let size = decoded.len();
                (decoded, json!({ "mode": "decode", "decodedSize": size }))
            }
            Err(e) => (
                format!("Invalid base64 input: {}\n", e).into_bytes(),
                json!({ "mode": "decode", "error": e.to_string() }),
            ),
        };
    }

    let encoded = STANDARD.encode(raw_bytes);
    let body = match source {
        Some(file) if file.mime_type.starts_with("image/") => {
            format!("data:{};base64,{}", file.mime_type, encoded)
        }
        _ => encoded,
    };
    let size = body.len();
    (body.into_bytes(), json!({ "mode": "encode", "encodedSize": size }))
}
