//! MP3 writer: an ID3v2.3 tag followed by silent MPEG-1 Layer III frames.

use crate::assembly::segment::{encode_id3_frame, latin1, synchsafe};

/// MPEG-1 Layer III, no CRC, 128 kbit/s, 44.1 kHz, no padding, stereo.
pub const MPEG_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];

/// `144 * bitrate / sample_rate` for the header above.
const FRAME_LENGTH: usize = 417;
const SAMPLES_PER_FRAME: u64 = 1152;
const SAMPLE_RATE: u64 = 44_100;

pub const DEFAULT_DURATION_SECS: u32 = 5;
pub const MAX_DURATION_SECS: u32 = 600;

#[derive(Debug, Clone)]
pub struct AudioSpec {
    pub title: String,
    pub artist: String,
    pub comment: String,
    pub duration_secs: u32,
}

/// Number of frames needed to cover `duration_secs` of audio.
pub fn frame_count(duration_secs: u32) -> u64 {
    let samples = u64::from(duration_secs) * SAMPLE_RATE;
    samples.div_ceil(SAMPLES_PER_FRAME)
}

pub fn write_mp3(spec: &AudioSpec) -> Vec<u8> {
    let duration = spec.duration_secs.clamp(1, MAX_DURATION_SECS);
    let frames = frame_count(duration);

    let mut tag_body = Vec::new();
    tag_body.extend(text_frame(*b"TIT2", &spec.title));
    tag_body.extend(text_frame(*b"TPE1", &spec.artist));
    tag_body.extend(text_frame(
        *b"TSSE",
        &format!("suntyn_tools {}", env!("CARGO_PKG_VERSION")),
    ));
    tag_body.extend(text_frame(*b"TLEN", &(u64::from(duration) * 1000).to_string()));
    tag_body.extend(comment_frame(&spec.comment));

    let mut out = Vec::with_capacity(10 + tag_body.len() + frames as usize * FRAME_LENGTH);
    out.extend_from_slice(b"ID3");
    out.extend_from_slice(&[3, 0, 0]);
    out.extend_from_slice(&synchsafe(tag_body.len() as u32));
    out.extend_from_slice(&tag_body);

    let mut frame = vec![0u8; FRAME_LENGTH];
    frame[..4].copy_from_slice(&MPEG_FRAME_HEADER);
    for _ in 0..frames {
        out.extend_from_slice(&frame);
    }
    out
}

fn text_frame(id: [u8; 4], text: &str) -> Vec<u8> {
    // Encoding byte 0: ISO-8859-1.
    let mut payload = vec![0u8];
    payload.extend(text.chars().map(latin1));
    encode_id3_frame(id, &payload)
}

fn comment_frame(text: &str) -> Vec<u8> {
    let mut payload = vec![0u8, b'e', b'n', b'g', 0];
    payload.extend(text.chars().map(latin1));
    encode_id3_frame(*b"COMM", &payload)
}
