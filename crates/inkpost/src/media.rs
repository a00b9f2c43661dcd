//! Image payload decoding and format detection.
//!
//! The image update endpoint accepts either a fully base64-encoded body or
//! a data-URL style string with a `base64,` marker somewhere after the
//! media-type prefix. Decoded bytes are sniffed with the `image` crate to
//! pick the stored file extension.

use base64::prelude::{Engine, BASE64_STANDARD};
use inkpost_core::{Error, Result};

const BASE64_MARKER: &str = "base64,";

/// Decodes the raw `image` field of an update-image request into bytes.
///
/// With `is_base64_encoded` set the whole string is decoded. Otherwise the
/// string must embed a `base64,` marker after a media-type prefix; a marker
/// at position zero means there is no prefix and the payload is rejected.
pub fn decode_image_payload(image: &str, is_base64_encoded: bool) -> Result<Vec<u8>> {
    if image.is_empty() {
        return Err(Error::Image("file should be an image".to_string()));
    }

    let encoded = if is_base64_encoded {
        image
    } else {
        match image.find(BASE64_MARKER) {
            Some(pos) if pos > 0 => &image[pos + BASE64_MARKER.len()..],
            _ => return Err(Error::Image("invalid image file".to_string())),
        }
    };

    BASE64_STANDARD
        .decode(encoded)
        .map_err(|_| Error::Image("invalid image file".to_string()))
}

/// Sniffs the image format of decoded bytes and returns the canonical
/// file extension.
pub fn detect_extension(data: &[u8]) -> Result<&'static str> {
    let format = image::guess_format(data)
        .map_err(|_| Error::Image("file should be an image".to_string()))?;
    format
        .extensions_str()
        .first()
        .copied()
        .ok_or_else(|| Error::Image("file should be an image".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_decode_fully_encoded_payload() {
        let encoded = BASE64_STANDARD.encode(PNG_MAGIC);
        let decoded = decode_image_payload(&encoded, true).unwrap();
        assert_eq!(decoded, PNG_MAGIC);
    }

    #[test]
    fn test_decode_data_url_payload() {
        let encoded = BASE64_STANDARD.encode(PNG_MAGIC);
        let payload = format!("data:image/png;base64,{encoded}");
        let decoded = decode_image_payload(&payload, false).unwrap();
        assert_eq!(decoded, PNG_MAGIC);
    }

    #[test]
    fn test_decode_rejects_marker_without_prefix() {
        let encoded = BASE64_STANDARD.encode(PNG_MAGIC);
        let payload = format!("base64,{encoded}");
        let result = decode_image_payload(&payload, false);
        assert!(matches!(result, Err(Error::Image(_))));
    }

    #[test]
    fn test_decode_rejects_missing_marker() {
        let result = decode_image_payload("data:image/png;AAAA", false);
        assert!(matches!(result, Err(Error::Image(_))));
    }

    #[test]
    fn test_decode_rejects_empty_payload() {
        let result = decode_image_payload("", true);
        match result {
            Err(Error::Image(message)) => assert_eq!(message, "file should be an image"),
            other => panic!("expected image error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_garbage_base64() {
        let result = decode_image_payload("not base64!!!", true);
        assert!(matches!(result, Err(Error::Image(_))));
    }

    #[test]
    fn test_detect_extension_png() {
        assert_eq!(detect_extension(&PNG_MAGIC).unwrap(), "png");
    }

    #[test]
    fn test_detect_extension_rejects_non_image() {
        let result = detect_extension(b"not an image");
        match result {
            Err(Error::Image(message)) => assert_eq!(message, "file should be an image"),
            other => panic!("expected image error, got {other:?}"),
        }
    }
}
