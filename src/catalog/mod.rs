//! Static tool catalog: every tool id the service answers to, with its
//! category and the assembler that produces its output.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::validation::DocumentKind;
use crate::domain::value_objects::{OutputFormat, ToolCategory};

/// Transformations offered by the developer tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeveloperTool {
    JsonFormatter,
    XmlFormatter,
    CsvToJson,
    JsonToCsv,
    Base64Encoder,
    UrlEncoder,
    HashGenerator,
    PasswordGenerator,
    QrCode,
    Barcode,
    HtmlMinifier,
    CssMinifier,
    JsMinifier,
    MarkdownToHtml,
    LoremIpsum,
    RegexTester,
    TimestampConverter,
    TextReport,
}

impl DeveloperTool {
    pub fn output_format(&self) -> OutputFormat {
        match self {
            DeveloperTool::JsonFormatter
            | DeveloperTool::CsvToJson
            | DeveloperTool::RegexTester
            | DeveloperTool::TimestampConverter => OutputFormat::Json,
            DeveloperTool::XmlFormatter => OutputFormat::Xml,
            DeveloperTool::JsonToCsv => OutputFormat::Csv,
            DeveloperTool::QrCode | DeveloperTool::Barcode => OutputFormat::Svg,
            DeveloperTool::HtmlMinifier | DeveloperTool::MarkdownToHtml => OutputFormat::Html,
            DeveloperTool::CssMinifier => OutputFormat::Css,
            DeveloperTool::JsMinifier => OutputFormat::Js,
            DeveloperTool::Base64Encoder
            | DeveloperTool::UrlEncoder
            | DeveloperTool::HashGenerator
            | DeveloperTool::PasswordGenerator
            | DeveloperTool::LoremIpsum
            | DeveloperTool::TextReport => OutputFormat::Text,
        }
    }
}

/// Which container writer builds a tool's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssemblerKind {
    PdfReport,
    Certificate { document: DocumentKind, masked: bool },
    Image { transparent: bool },
    Audio,
    Video,
    Developer(DeveloperTool),
}

impl AssemblerKind {
    pub fn output_format(&self) -> OutputFormat {
        match self {
            AssemblerKind::PdfReport | AssemblerKind::Certificate { .. } => OutputFormat::Pdf,
            AssemblerKind::Image { .. } => OutputFormat::Png,
            AssemblerKind::Audio => OutputFormat::Mp3,
            AssemblerKind::Video => OutputFormat::Mp4,
            AssemblerKind::Developer(tool) => tool.output_format(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ToolCategory,
    pub assembler: AssemblerKind,
}

impl ToolDescriptor {
    pub fn output_format(&self) -> OutputFormat {
        self.assembler.output_format()
    }

    /// Fixed output name; concurrent requests for one tool share it.
    pub fn output_file_name(&self) -> String {
        format!("processed-{}.{}", self.id, self.output_format().extension())
    }
}

/// Assembler used for a catalog entry with no dedicated one.
pub const fn category_default(category: ToolCategory) -> AssemblerKind {
    match category {
        ToolCategory::Pdf => AssemblerKind::PdfReport,
        ToolCategory::Image => AssemblerKind::Image { transparent: false },
        ToolCategory::Media => AssemblerKind::Audio,
        ToolCategory::Government => AssemblerKind::Certificate {
            document: DocumentKind::Generic,
            masked: false,
        },
        ToolCategory::Developer => AssemblerKind::Developer(DeveloperTool::TextReport),
    }
}

macro_rules! tool {
    ($id:literal, $name:literal, $category:ident) => {
        ToolDescriptor {
            id: $id,
            name: $name,
            category: ToolCategory::$category,
            assembler: category_default(ToolCategory::$category),
        }
    };
    ($id:literal, $name:literal, $category:ident, $assembler:expr) => {
        ToolDescriptor {
            id: $id,
            name: $name,
            category: ToolCategory::$category,
            assembler: $assembler,
        }
    };
}

const VIDEO: AssemblerKind = AssemblerKind::Video;
const PNG: AssemblerKind = AssemblerKind::Image { transparent: false };

const fn dev(tool: DeveloperTool) -> AssemblerKind {
    AssemblerKind::Developer(tool)
}

const fn certificate(document: DocumentKind) -> AssemblerKind {
    AssemblerKind::Certificate {
        document,
        masked: false,
    }
}

static TOOLS: &[ToolDescriptor] = &[
    // PDF
    tool!("pdf-merger", "PDF Merger", Pdf),
    tool!("pdf-splitter", "PDF Splitter", Pdf),
    tool!("pdf-compressor", "PDF Compressor", Pdf),
    tool!("pdf-to-word", "PDF to Word", Pdf),
    tool!("word-to-pdf", "Word to PDF", Pdf),
    tool!("pdf-to-excel", "PDF to Excel", Pdf),
    tool!("excel-to-pdf", "Excel to PDF", Pdf),
    tool!("pdf-to-powerpoint", "PDF to PowerPoint", Pdf),
    tool!("powerpoint-to-pdf", "PowerPoint to PDF", Pdf),
    tool!("pdf-to-image", "PDF to Image", Pdf),
    tool!("image-to-pdf", "Image to PDF", Pdf),
    tool!("pdf-unlock", "PDF Unlock", Pdf),
    tool!("pdf-lock", "PDF Lock", Pdf),
    tool!("pdf-rotate", "PDF Rotate", Pdf),
    tool!("pdf-watermark", "PDF Watermark", Pdf),
    tool!("pdf-page-extractor", "PDF Page Extractor", Pdf),
    tool!("pdf-page-numberer", "PDF Page Numberer", Pdf),
    tool!("pdf-text-extract", "PDF Text Extract", Pdf),
    tool!("text-to-pdf", "Text to PDF", Pdf),
    tool!("pdf-metadata", "PDF Metadata", Pdf),
    tool!("pdf-ocr", "PDF OCR", Pdf),
    tool!("pdf-sign", "PDF Sign", Pdf),
    tool!("pdf-repair", "PDF Repair", Pdf),
    tool!("pdf-organize", "PDF Organize", Pdf),
    tool!("pdf-bookmark", "PDF Bookmark", Pdf),
    // Image
    tool!("image-resizer", "Image Resizer", Image),
    tool!("image-compressor", "Image Compressor", Image),
    tool!("image-converter", "Image Converter", Image),
    tool!(
        "bg-remover",
        "Background Remover",
        Image,
        AssemblerKind::Image { transparent: true }
    ),
    tool!("image-cropper", "Image Cropper", Image),
    tool!("image-rotator", "Image Rotator", Image),
    tool!("image-flipper", "Image Flipper", Image),
    tool!("image-filter", "Image Filter", Image),
    tool!("image-enhance", "Image Enhancer", Image),
    tool!("image-upscale", "Image Upscaler", Image),
    tool!("watermark-add", "Add Watermark", Image),
    tool!("watermark-remover", "Watermark Remover", Image),
    tool!("image-blur", "Image Blur", Image),
    tool!("image-sharpen", "Image Sharpen", Image),
    tool!("image-border", "Image Border", Image),
    tool!("image-metadata", "Image Metadata", Image),
    tool!("meme-generator", "Meme Generator", Image),
    tool!("image-colorizer", "Image Colorizer", Image),
    tool!("image-merge", "Image Merge", Image),
    tool!("image-split", "Image Split", Image),
    // Media
    tool!("audio-converter", "Audio Converter", Media),
    tool!("video-converter", "Video Converter", Media, VIDEO),
    tool!("audio-trimmer", "Audio Trimmer", Media),
    tool!("video-trimmer", "Video Trimmer", Media, VIDEO),
    tool!("audio-merger", "Audio Merger", Media),
    tool!("video-merger", "Video Merger", Media, VIDEO),
    tool!("audio-extractor", "Audio Extractor", Media),
    tool!("video-compressor", "Video Compressor", Media, VIDEO),
    tool!("audio-compressor", "Audio Compressor", Media),
    tool!("volume-changer", "Volume Changer", Media),
    tool!("speed-changer", "Speed Changer", Media),
    tool!("audio-normalizer", "Audio Normalizer", Media),
    tool!("noise-reducer", "Noise Reducer", Media),
    tool!("vocal-remover", "Vocal Remover", Media),
    tool!("audio-reverser", "Audio Reverser", Media),
    tool!("pitch-changer", "Pitch Changer", Media),
    tool!("video-resizer", "Video Resizer", Media, VIDEO),
    tool!("video-rotator", "Video Rotator", Media, VIDEO),
    tool!("video-to-gif", "Video to GIF", Media, VIDEO),
    tool!("gif-to-video", "GIF to Video", Media, VIDEO),
    // Government
    tool!("pan-validator", "PAN Validator", Government, certificate(DocumentKind::Pan)),
    tool!("gst-validator", "GST Validator", Government, certificate(DocumentKind::Gstin)),
    tool!(
        "aadhaar-validator",
        "Aadhaar Validator",
        Government,
        certificate(DocumentKind::Aadhaar)
    ),
    tool!(
        "aadhaar-masker",
        "Aadhaar Masker",
        Government,
        AssemblerKind::Certificate {
            document: DocumentKind::Aadhaar,
            masked: true
        }
    ),
    tool!(
        "voter-id-extractor",
        "Voter ID Extractor",
        Government,
        certificate(DocumentKind::VoterId)
    ),
    tool!("income-certificate", "Income Certificate", Government),
    tool!("caste-certificate", "Caste Certificate", Government),
    tool!("birth-certificate", "Birth Certificate", Government),
    tool!("death-certificate", "Death Certificate", Government),
    tool!("ration-card-status", "Ration Card Status", Government),
    tool!("passport-photo", "Passport Photo", Government, PNG),
    tool!("rent-agreement", "Rent Agreement", Government),
    tool!("affidavit-generator", "Affidavit Generator", Government),
    tool!("police-verification", "Police Verification", Government),
    tool!("gazette-formatter", "Gazette Formatter", Government),
    // Developer
    tool!("json-formatter", "JSON Formatter", Developer, dev(DeveloperTool::JsonFormatter)),
    tool!("xml-formatter", "XML Formatter", Developer, dev(DeveloperTool::XmlFormatter)),
    tool!("csv-to-json", "CSV to JSON", Developer, dev(DeveloperTool::CsvToJson)),
    tool!("json-to-csv", "JSON to CSV", Developer, dev(DeveloperTool::JsonToCsv)),
    tool!("base64-encoder", "Base64 Encoder", Developer, dev(DeveloperTool::Base64Encoder)),
    tool!("url-encoder", "URL Encoder", Developer, dev(DeveloperTool::UrlEncoder)),
    tool!("hash-generator", "Hash Generator", Developer, dev(DeveloperTool::HashGenerator)),
    tool!(
        "password-generator",
        "Password Generator",
        Developer,
        dev(DeveloperTool::PasswordGenerator)
    ),
    tool!("qr-generator", "QR Code Generator", Developer, dev(DeveloperTool::QrCode)),
    tool!("barcode-generator", "Barcode Generator", Developer, dev(DeveloperTool::Barcode)),
    tool!("color-picker", "Color Picker", Developer),
    tool!("lorem-ipsum", "Lorem Ipsum Generator", Developer, dev(DeveloperTool::LoremIpsum)),
    tool!("regex-tester", "Regex Tester", Developer, dev(DeveloperTool::RegexTester)),
    tool!(
        "timestamp-converter",
        "Timestamp Converter",
        Developer,
        dev(DeveloperTool::TimestampConverter)
    ),
    tool!("unit-converter", "Unit Converter", Developer),
    tool!(
        "markdown-to-html",
        "Markdown to HTML",
        Developer,
        dev(DeveloperTool::MarkdownToHtml)
    ),
    tool!("html-to-pdf", "HTML to PDF", Developer, AssemblerKind::PdfReport),
    tool!("html-minifier", "HTML Minifier", Developer, dev(DeveloperTool::HtmlMinifier)),
    tool!("css-minifier", "CSS Minifier", Developer, dev(DeveloperTool::CssMinifier)),
    tool!("js-minifier", "JS Minifier", Developer, dev(DeveloperTool::JsMinifier)),
    tool!("image-to-base64", "Image to Base64", Developer, dev(DeveloperTool::Base64Encoder)),
    tool!("url-shortener", "URL Shortener", Developer),
    tool!("meta-tag-generator", "Meta Tag Generator", Developer),
    tool!("favicon-generator", "Favicon Generator", Developer, PNG),
    tool!("logo-generator", "Logo Generator", Developer, PNG),
    tool!("color-palette-generator", "Color Palette Generator", Developer),
    tool!("text-to-speech", "Text to Speech", Developer, AssemblerKind::Audio),
    tool!("speech-to-text", "Speech to Text", Developer),
    tool!("unicode-converter", "Unicode Converter", Developer),
];

static INDEX: Lazy<HashMap<&'static str, &'static ToolDescriptor>> =
    Lazy::new(|| TOOLS.iter().map(|tool| (tool.id, tool)).collect());

/// Looks up a tool by id. Unknown ids resolve to `None`.
pub fn resolve(id: &str) -> Option<&'static ToolDescriptor> {
    INDEX.get(id).copied()
}

pub fn all() -> &'static [ToolDescriptor] {
    TOOLS
}

pub fn by_category(category: ToolCategory) -> impl Iterator<Item = &'static ToolDescriptor> {
    TOOLS.iter().filter(move |tool| tool.category == category)
}
