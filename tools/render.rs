//! Suntyn render CLI
//!
//! Runs catalog tools locally, without the HTTP server.

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use suntyn_tools::assembly::{assemble, AssemblyContext, ToolOptions, UploadedFileInfo};
use suntyn_tools::catalog;
use suntyn_tools::domain::validation::{check_document, DocumentKind};
use suntyn_tools::value_objects::{OutputFormat, ToolCategory};

#[derive(Parser)]
#[command(name = "suntyn-render")]
#[command(about = "Assemble Suntyn tool outputs to local files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog tools
    List {
        /// Only show one category (pdf, image, media, government, developer)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Run one tool and write its output
    Render {
        /// Catalog id, e.g. pdf-merger
        tool_id: String,
        /// Input files (repeatable)
        #[arg(short, long = "input")]
        inputs: Vec<PathBuf>,
        /// Tool options as a JSON object
        #[arg(short, long)]
        metadata: Option<String>,
        /// Output path (default: processed-<tool>.<ext> in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a government document number
    Check {
        #[arg(value_enum)]
        kind: Kind,
        number: String,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Pan,
    Gstin,
    Aadhaar,
    Passport,
    VoterId,
    Generic,
}

impl From<Kind> for DocumentKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Pan => DocumentKind::Pan,
            Kind::Gstin => DocumentKind::Gstin,
            Kind::Aadhaar => DocumentKind::Aadhaar,
            Kind::Passport => DocumentKind::Passport,
            Kind::VoterId => DocumentKind::VoterId,
            Kind::Generic => DocumentKind::Generic,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List { category } => list_tools(category.as_deref())?,
        Commands::Render {
            tool_id,
            inputs,
            metadata,
            output,
        } => render(&tool_id, &inputs, metadata.as_deref(), output)?,
        Commands::Check { kind, number } => check(kind.into(), &number),
    }

    Ok(())
}

fn list_tools(category: Option<&str>) -> Result<()> {
    let categories: Vec<ToolCategory> = match category {
        Some(raw) => vec![raw.parse::<ToolCategory>().map_err(anyhow::Error::msg)?],
        None => ToolCategory::ALL.to_vec(),
    };

    for category in categories {
        println!("{}:", category);
        for tool in catalog::by_category(category) {
            println!(
                "  {:<28} {:<32} .{}",
                tool.id,
                tool.name,
                tool.output_format().extension()
            );
        }
    }
    Ok(())
}

fn mime_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|e| OutputFormat::from_extension(&e.to_ascii_lowercase()))
        .map(|f| f.mime_type())
        .unwrap_or("application/octet-stream")
}

fn render(
    tool_id: &str,
    inputs: &[PathBuf],
    metadata: Option<&str>,
    output: Option<PathBuf>,
) -> Result<()> {
    let Some(tool) = catalog::resolve(tool_id) else {
        bail!("Unknown tool '{}'; run `suntyn-render list`", tool_id);
    };

    let mut files = Vec::with_capacity(inputs.len());
    for path in inputs {
        let data = fs::read(path).with_context(|| format!("Failed to read input: {:?}", path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "input".to_string());
        files.push(UploadedFileInfo::new(&name, mime_for(path), Bytes::from(data)));
    }

    let mut options = ToolOptions::new();
    if let Some(raw) = metadata {
        let value: serde_json::Value =
            serde_json::from_str(raw).context("--metadata must be valid JSON")?;
        if !value.is_object() {
            bail!("--metadata must be a JSON object");
        }
        options.merge(value);
    }

    let ctx = AssemblyContext::now();
    let assembled = assemble(tool, &files, &options, &ctx)
        .with_context(|| format!("Failed to assemble {}", tool.id))?;

    let output = output.unwrap_or_else(|| PathBuf::from(tool.output_file_name()));
    fs::write(&output, &assembled.bytes)
        .with_context(|| format!("Failed to write output: {:?}", output))?;

    println!(
        "{} -> {:?} ({} bytes, {})",
        tool.name,
        output,
        assembled.bytes.len(),
        assembled.format.mime_type()
    );
    println!("{}", serde_json::to_string_pretty(&assembled.metadata)?);
    Ok(())
}

fn check(kind: DocumentKind, number: &str) {
    let result = check_document(kind, number);
    println!("{}: {}", kind.label(), result.normalized);
    println!(
        "  format:   {}",
        if result.format_valid { "PASSED" } else { "FAILED" }
    );
    println!(
        "  checksum: {}",
        if result.checksum_valid { "PASSED" } else { "FAILED" }
    );
    println!("  status:   {}", if result.is_valid() { "VALID" } else { "INVALID" });
}
