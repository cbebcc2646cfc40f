//! Container assembly: turns a tool descriptor, uploaded file facts and
//! request options into the bytes of an output file.

pub mod audio;
pub mod pdf;
pub mod png;
pub mod segment;
mod text;
mod tools;
pub mod video;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::{AssemblerKind, ToolDescriptor};
use crate::domain::value_objects::OutputFormat;

/// Bytes examined when sniffing an upload's format.
pub const HEAD_LEN: usize = 512;

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("Invalid option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    #[error("Encoding failed: {0}")]
    Encode(#[source] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An uploaded file already held in memory.
#[derive(Debug, Clone)]
pub struct UploadedFileInfo {
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    pub data: Bytes,
}

impl UploadedFileInfo {
    pub fn new(original_name: &str, mime_type: &str, data: Bytes) -> Self {
        Self {
            original_name: original_name.to_string(),
            mime_type: mime_type.to_string(),
            size: data.len() as u64,
            data,
        }
    }

    /// Leading bytes used for format sniffing.
    pub fn head(&self) -> &[u8] {
        &self.data[..self.data.len().min(HEAD_LEN)]
    }
}

/// Free-form request options from the `metadata` field and plain form fields.
#[derive(Debug, Clone, Default)]
pub struct ToolOptions {
    values: Map<String, Value>,
}

impl ToolOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Copies every key of a JSON object; non-object values are ignored.
    pub fn merge(&mut self, value: Value) {
        if let Value::Object(map) = value {
            self.values.extend(map);
        }
    }

    /// String form of `key`. Numbers and booleans are stringified; empty
    /// strings count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// Reads a non-negative integer given as a JSON number or numeric string.
    pub fn u32(&self, key: &str) -> Result<Option<u32>, AssemblyError> {
        let Some(raw) = self.text(key) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| AssemblyError::InvalidOption {
                name: key.to_string(),
                reason: format!("expected a non-negative integer, got '{}'", raw),
            })
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

/// Per-request inputs that are not derived from the uploads.
#[derive(Debug, Clone)]
pub struct AssemblyContext {
    pub generated_at: DateTime<Utc>,
    pub processing_id: String,
}

impl AssemblyContext {
    /// Current time plus a random 16-digit upper-case hex id.
    pub fn now() -> Self {
        Self {
            generated_at: Utc::now(),
            processing_id: hex::encode_upper(rand::random::<[u8; 8]>()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssembledOutput {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
    /// Tool-specific facts echoed back to the caller.
    pub metadata: Value,
}

/// Builds the output for `tool`.
///
/// Performs no I/O. Empty `files` is allowed: every assembler has defaults.
pub fn assemble(
    tool: &ToolDescriptor,
    files: &[UploadedFileInfo],
    options: &ToolOptions,
    ctx: &AssemblyContext,
) -> Result<AssembledOutput, AssemblyError> {
    match tool.assembler {
        AssemblerKind::PdfReport => Ok(tools::pdf_report(tool, files, ctx)),
        AssemblerKind::Certificate { document, masked } => {
            Ok(tools::certificate(tool, document, masked, options, ctx))
        }
        AssemblerKind::Image { transparent } => tools::image(tool, transparent, files, options),
        AssemblerKind::Audio => tools::audio(tool, files, options, ctx),
        AssemblerKind::Video => Ok(tools::video(tool, files, ctx)),
        AssemblerKind::Developer(kind) => text::developer(tool, kind, files, options, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn options_stringify_scalars() {
        let mut options = ToolOptions::new();
        options.merge(json!({"width": 640, "name": "x", "flag": true, "empty": ""}));
        assert_eq!(options.text("width").as_deref(), Some("640"));
        assert_eq!(options.text("flag").as_deref(), Some("true"));
        assert_eq!(options.text("empty"), None);
        assert_eq!(options.first_text(&["missing", "name"]).as_deref(), Some("x"));
    }

    #[test]
    fn integer_options_validate() {
        let mut options = ToolOptions::new();
        options.insert("width", json!("800"));
        options.insert("height", json!("tall"));
        assert_eq!(options.u32("width").unwrap(), Some(800));
        assert_eq!(options.u32("missing").unwrap(), None);
        assert!(matches!(
            options.u32("height"),
            Err(AssemblyError::InvalidOption { .. })
        ));
    }

    #[test]
    fn head_is_bounded() {
        let upload = UploadedFileInfo::new("big.bin", "application/octet-stream", Bytes::from(vec![1u8; 2048]));
        assert_eq!(upload.head().len(), HEAD_LEN);
        assert_eq!(upload.size, 2048);
    }

    #[test]
    fn processing_ids_are_hex() {
        let ctx = AssemblyContext::now();
        assert_eq!(ctx.processing_id.len(), 16);
        assert!(ctx.processing_id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
