//! Base64 Helpers

use base64::{Engine, engine::general_purpose};

/// Decode standard base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Decode standard base64 that must hold UTF-8 text
///
/// Returns `None` for invalid base64 and for non UTF-8 payloads alike.
pub fn from_base64_utf8(s: &str) -> Option<String> {
    let bytes = from_base64(s).ok()?;
    String::from_utf8(bytes).ok()
}
