//! Image format detection for vision payloads.
//!
//! Callers hand us bare base64 without a MIME type. Providers want one, so
//! we decode just enough of the header to recognise the common formats.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Used when the header is unrecognised or the input does not decode.
pub const FALLBACK_MIME: &str = "image/png";

/// Base64 characters needed to cover the longest signature (12 bytes).
const HEADER_CHARS: usize = 16;

/// Guess the MIME type of a base64-encoded image from its magic bytes.
pub fn sniff_mime(image_base64: &str) -> &'static str {
    let trimmed = image_base64.trim_start();
    let head = match trimmed.char_indices().nth(HEADER_CHARS) {
        Some((idx, _)) => &trimmed[..idx],
        None => trimmed,
    };

    let Ok(bytes) = STANDARD.decode(head) else {
        return FALLBACK_MIME;
    };

    match bytes.as_slice() {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => FALLBACK_MIME,
    }
}

/// `data:` URL for chat-completions style image parts.
pub fn data_url(image_base64: &str) -> String {
    format!("data:{};base64,{image_base64}", sniff_mime(image_base64))
}
