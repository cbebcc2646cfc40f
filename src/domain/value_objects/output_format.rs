use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// File format of an assembled tool output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Png,
    Mp3,
    Mp4,
    Json,
    Csv,
    Xml,
    Html,
    Css,
    Js,
    Svg,
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Xml => "xml",
            OutputFormat::Html => "html",
            OutputFormat::Css => "css",
            OutputFormat::Js => "js",
            OutputFormat::Svg => "svg",
            OutputFormat::Text => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Png => "image/png",
            OutputFormat::Mp3 => "audio/mpeg",
            OutputFormat::Mp4 => "video/mp4",
            OutputFormat::Json => "application/json",
            OutputFormat::Csv => "text/csv",
            OutputFormat::Xml => "application/xml",
            OutputFormat::Html => "text/html",
            OutputFormat::Css => "text/css",
            OutputFormat::Js => "application/javascript",
            OutputFormat::Svg => "image/svg+xml",
            OutputFormat::Text => "text/plain",
        }
    }

    /// Reverse lookup used when serving a stored output by file name.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let format = match ext.to_ascii_lowercase().as_str() {
            "pdf" => OutputFormat::Pdf,
            "png" => OutputFormat::Png,
            "mp3" => OutputFormat::Mp3,
            "mp4" => OutputFormat::Mp4,
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "xml" => OutputFormat::Xml,
            "html" | "htm" => OutputFormat::Html,
            "css" => OutputFormat::Css,
            "js" => OutputFormat::Js,
            "svg" => OutputFormat::Svg,
            "txt" => OutputFormat::Text,
            _ => return None,
        };
        Some(format)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_lookup_is_inverse() {
        for format in [
            OutputFormat::Pdf,
            OutputFormat::Png,
            OutputFormat::Mp3,
            OutputFormat::Mp4,
            OutputFormat::Json,
            OutputFormat::Text,
            OutputFormat::Svg,
        ] {
            assert_eq!(OutputFormat::from_extension(format.extension()), Some(format));
        }
    }

    #[test]
    fn unknown_extension_has_no_format() {
        assert_eq!(OutputFormat::from_extension("exe"), None);
        assert_eq!(OutputFormat::from_extension("PDF"), Some(OutputFormat::Pdf));
    }
}
