use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use veracity_error::ValidationError;

const DATA_URI_MARKER: &str = "base64,";

/// Decode a base64 image, with or without a `data:<mime>;base64,` prefix.
///
/// # Examples
///
/// ```
/// use veracity_pipeline::decode_image;
///
/// assert_eq!(decode_image("data:image/png;base64,aGk=").unwrap(), b"hi");
/// assert_eq!(decode_image("aGk=").unwrap(), b"hi");
/// ```
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, ValidationError> {
    let payload = match encoded.find(DATA_URI_MARKER) {
        Some(index) => &encoded[index + DATA_URI_MARKER.len()..],
        None => encoded,
    };

    STANDARD
        .decode(payload.trim())
        .map_err(|e| ValidationError::new(format!("Invalid base64 image data: {}", e)))
}
