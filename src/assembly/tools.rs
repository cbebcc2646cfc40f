//! Assemblers for the binary container outputs.

use serde_json::json;

use crate::assembly::audio::{self, AudioSpec};
use crate::assembly::pdf::{write_text_document, DocumentInfo};
use crate::assembly::png::{self, ColorMode, ImageSpec};
use crate::assembly::video::{self, VideoSpec};
use crate::assembly::{
    AssembledOutput, AssemblyContext, AssemblyError, ToolOptions, UploadedFileInfo,
};
use crate::catalog::ToolDescriptor;
use crate::domain::validation::{check_document, mask_aadhaar, DocumentKind};
use crate::domain::value_objects::OutputFormat;
use crate::render::{self, certificate_lines, compressed_size, report_pages, ReportFacts};

fn document_info(tool: &ToolDescriptor, subject: &str, ctx: &AssemblyContext) -> DocumentInfo {
    DocumentInfo {
        title: format!("{} - Processed Document", tool.name),
        subject: subject.to_string(),
        creator: "Suntyn AI".to_string(),
        created: ctx.generated_at,
    }
}

pub(super) fn pdf_report(
    tool: &ToolDescriptor,
    files: &[UploadedFileInfo],
    ctx: &AssemblyContext,
) -> AssembledOutput {
    let facts = ReportFacts::collect(tool.id, tool.name, files, ctx.generated_at);
    let pages = report_pages(&facts);
    let bytes = write_text_document(&document_info(tool, "Processing report", ctx), &pages);

    let mut metadata = json!({
        "pages": pages.len(),
        "filesProcessed": facts.files.len(),
        "totalSize": facts.total_size(),
        "totalPages": facts.total_pages(),
        "placeholderInput": !facts.from_uploads,
    });
    if let Some(size) = compressed_size(&facts) {
        metadata["estimatedOutputSize"] = json!(size);
    }

    AssembledOutput {
        format: OutputFormat::Pdf,
        bytes,
        metadata,
    }
}

pub(super) fn certificate(
    tool: &ToolDescriptor,
    document: DocumentKind,
    masked: bool,
    options: &ToolOptions,
    ctx: &AssemblyContext,
) -> AssembledOutput {
    let raw = options
        .first_text(&["documentNumber", "number", "text"])
        .unwrap_or_else(|| document.sample_number().to_string());
    let check = check_document(document, &raw);

    let lines = certificate_lines(
        tool.name,
        &check,
        masked,
        ctx.generated_at,
        &ctx.processing_id,
    );
    let bytes = write_text_document(
        &document_info(tool, "Document validation certificate", ctx),
        &[lines],
    );

    let shown = if masked {
        mask_aadhaar(&check.normalized)
    } else {
        check.normalized.clone()
    };

    AssembledOutput {
        format: OutputFormat::Pdf,
        bytes,
        metadata: json!({
            "documentType": document.label(),
            "documentNumber": shown,
            "isValid": check.is_valid(),
            "formatValid": check.format_valid,
            "checksumValid": check.checksum_valid,
            "processingId": ctx.processing_id,
        }),
    }
}

pub(super) fn image(
    tool: &ToolDescriptor,
    transparent: bool,
    files: &[UploadedFileInfo],
    options: &ToolOptions,
) -> Result<AssembledOutput, AssemblyError> {
    let source = files.first();
    let source_dims = source.and_then(|f| png::sniff_dimensions(f.head()));

    let width = options
        .u32("width")?
        .or(source_dims.map(|(w, _)| w))
        .unwrap_or(png::DEFAULT_WIDTH);
    let height = options
        .u32("height")?
        .or(source_dims.map(|(_, h)| h))
        .unwrap_or(png::DEFAULT_HEIGHT);

    let color = if transparent {
        ColorMode::Rgba
    } else {
        ColorMode::Rgb
    };
    let source_name = source.map(|f| f.original_name.as_str()).unwrap_or("generated");
    let spec = ImageSpec::clamped(width, height, color).with_text(
        "Software",
        format!("Suntyn AI {} - {}", tool.name, source_name),
    );
    let bytes = png::write_png(&spec)?;

    Ok(AssembledOutput {
        format: OutputFormat::Png,
        bytes,
        metadata: json!({
            "width": spec.width,
            "height": spec.height,
            "colorMode": if transparent { "RGBA" } else { "RGB" },
            "sourceFile": source.map(|f| f.original_name.clone()),
        }),
    })
}

pub(super) fn audio(
    tool: &ToolDescriptor,
    files: &[UploadedFileInfo],
    options: &ToolOptions,
    ctx: &AssemblyContext,
) -> Result<AssembledOutput, AssemblyError> {
    let duration = options
        .u32("duration")?
        .unwrap_or(audio::DEFAULT_DURATION_SECS)
        .clamp(1, audio::MAX_DURATION_SECS);
    let source = files.first();

    let spec = AudioSpec {
        title: options.text("title").unwrap_or_else(|| tool.name.to_string()),
        artist: "Suntyn AI".to_string(),
        comment: match source {
            Some(file) => format!(
                "{} of {} ({})",
                tool.name,
                file.original_name,
                render::format_kb(file.size)
            ),
            None => format!("{} output {}", tool.name, ctx.generated_at.to_rfc3339()),
        },
        duration_secs: duration,
    };

    Ok(AssembledOutput {
        format: OutputFormat::Mp3,
        bytes: audio::write_mp3(&spec),
        metadata: json!({
            "durationSeconds": duration,
            "frames": audio::frame_count(duration),
            "bitrate": "128 kbps",
            "sampleRate": 44_100,
            "sourceFile": source.map(|f| f.original_name.clone()),
        }),
    })
}

pub(super) fn video(
    tool: &ToolDescriptor,
    files: &[UploadedFileInfo],
    ctx: &AssemblyContext,
) -> AssembledOutput {
    let source = files.first();
    let notes = match source {
        Some(file) => format!(
            "{} processed {} ({}) at {}",
            tool.name,
            file.original_name,
            render::format_kb(file.size),
            ctx.generated_at.to_rfc3339()
        ),
        None => format!("{} output at {}", tool.name, ctx.generated_at.to_rfc3339()),
    };

    AssembledOutput {
        format: OutputFormat::Mp4,
        bytes: video::write_mp4(&VideoSpec {
            notes,
            mdat_bytes: video::DEFAULT_MDAT_BYTES,
        }),
        metadata: json!({
            "container": "mp4",
            "brands": ["isom", "iso2", "avc1", "mp41"],
            "sourceFile": source.map(|f| f.original_name.clone()),
        }),
    }
}
