//! PNG writer producing a gradient image with a real zlib IDAT stream.

use std::io::Write;

use flate2::{write::ZlibEncoder, Compression};

use crate::assembly::segment::{encode_segment, latin1};
use crate::assembly::AssemblyError;

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Largest width or height the writer accepts; larger requests are clamped.
pub const MAX_DIMENSION: u32 = 4096;

pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    /// RGB plus an alpha channel: opaque centre, translucent surroundings.
    Rgba,
}

impl ColorMode {
    fn color_type(self) -> u8 {
        match self {
            ColorMode::Rgb => 2,
            ColorMode::Rgba => 6,
        }
    }

    fn channels(self) -> usize {
        match self {
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageSpec {
    pub width: u32,
    pub height: u32,
    pub color: ColorMode,
    /// `tEXt` keyword/value pairs, written before the image data.
    pub text: Vec<(String, String)>,
}

impl ImageSpec {
    /// Builds a spec with both dimensions clamped to `1..=MAX_DIMENSION`.
    pub fn clamped(width: u32, height: u32, color: ColorMode) -> Self {
        Self {
            width: width.clamp(1, MAX_DIMENSION),
            height: height.clamp(1, MAX_DIMENSION),
            color,
            text: Vec::new(),
        }
    }

    pub fn with_text(mut self, keyword: &str, value: impl Into<String>) -> Self {
        self.text.push((keyword.to_string(), value.into()));
        self
    }
}

/// Reads width and height from a PNG header, if `head` starts with one.
pub fn sniff_dimensions(head: &[u8]) -> Option<(u32, u32)> {
    if head.len() < 24 || head[..8] != PNG_SIGNATURE || &head[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes([head[16], head[17], head[18], head[19]]);
    let height = u32::from_be_bytes([head[20], head[21], head[22], head[23]]);
    Some((width, height))
}

/// Serializes `spec` as a complete PNG file.
///
/// Scanlines are generated row by row straight into the deflate stream, so
/// peak memory tracks the compressed size rather than the raw pixel count.
pub fn write_png(spec: &ImageSpec) -> Result<Vec<u8>, AssemblyError> {
    let mut out = Vec::new();
    out.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&spec.width.to_be_bytes());
    ihdr.extend_from_slice(&spec.height.to_be_bytes());
    ihdr.extend_from_slice(&[8, spec.color.color_type(), 0, 0, 0]);
    out.extend_from_slice(&encode_segment(*b"IHDR", &ihdr));

    for (keyword, value) in &spec.text {
        out.extend_from_slice(&encode_segment(*b"tEXt", &text_payload(keyword, value)));
    }

    let idat = compress_scanlines(spec)?;
    out.extend_from_slice(&encode_segment(*b"IDAT", &idat));
    out.extend_from_slice(&encode_segment(*b"IEND", &[]));
    Ok(out)
}

fn compress_scanlines(spec: &ImageSpec) -> Result<Vec<u8>, AssemblyError> {
    let width = spec.width as usize;
    let channels = spec.color.channels();
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
    let mut row = vec![0u8; 1 + width * channels];

    for y in 0..spec.height {
        // Filter type 0 (None) for every scanline.
        row[0] = 0;
        for x in 0..spec.width {
            let pixel = gradient_pixel(x, y, spec);
            let start = 1 + x as usize * channels;
            row[start..start + channels].copy_from_slice(&pixel[..channels]);
        }
        encoder.write_all(&row).map_err(AssemblyError::Encode)?;
    }

    encoder.finish().map_err(AssemblyError::Encode)
}

/// Teal (#40E0D0) to purple (#9333EA) left to right, lightening downwards.
fn gradient_pixel(x: u32, y: u32, spec: &ImageSpec) -> [u8; 4] {
    let px = ratio(x, spec.width);
    let py = ratio(y, spec.height);

    let channel = |start: f32, end: f32| -> u8 {
        (start + px * (end - start) + py * 30.0).clamp(0.0, 255.0) as u8
    };

    let alpha = match spec.color {
        ColorMode::Rgb => 255,
        ColorMode::Rgba => {
            let dx = px * 2.0 - 1.0;
            let dy = py * 2.0 - 1.0;
            if dx * dx + dy * dy <= 0.64 {
                255
            } else {
                48
            }
        }
    };

    [
        channel(64.0, 147.0),
        channel(224.0, 51.0),
        channel(208.0, 255.0),
        alpha,
    ]
}

fn ratio(position: u32, extent: u32) -> f32 {
    if extent <= 1 {
        0.0
    } else {
        position as f32 / (extent - 1) as f32
    }
}

/// `keyword NUL text`, Latin-1; characters outside it become `?`.
fn text_payload(keyword: &str, value: &str) -> Vec<u8> {
    let mut payload: Vec<u8> = keyword.chars().take(79).map(latin1).collect();
    payload.push(0);
    payload.extend(value.chars().map(latin1));
    payload
}
