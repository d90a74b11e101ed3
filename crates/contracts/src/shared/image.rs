//! Base64 image helpers for read responses and JSON uploads

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const PNG_PREFIX: &str = "iVBOR";

pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// MIME type guessed from the base64 payload; JPEG unless it looks like PNG
pub fn image_mime(base64: &str) -> &'static str {
    if base64.starts_with(PNG_PREFIX) {
        "image/png"
    } else {
        "image/jpeg"
    }
}

/// `data:` URL for an `<img src>`; values that already are data URLs pass through
pub fn image_data_url(base64: &str) -> String {
    let trimmed = base64.trim();
    if trimmed.starts_with("data:") {
        trimmed.to_string()
    } else {
        format!("data:{};base64,{}", image_mime(trimmed), trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_detection() {
        assert_eq!(image_mime("iVBORw0KGgo="), "image/png");
        assert_eq!(image_mime("/9j/4AAQSkZJRg=="), "image/jpeg");
    }

    #[test]
    fn test_data_url() {
        assert_eq!(image_data_url("/9j/abc"), "data:image/jpeg;base64,/9j/abc");
        assert_eq!(
            image_data_url("data:image/png;base64,xyz"),
            "data:image/png;base64,xyz"
        );
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode_base64(b"farm"), "ZmFybQ==");
    }
}
