//! Base64URL encoding/decoding per RFC 4648
//!
//! Thin wrapper around the `base64` crate: URL-safe alphabet, no padding,
//! and a size limit on every decode.

use crate::error::{Error, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Encode bytes to a Base64URL string
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Encode a UTF-8 string to Base64URL
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode a Base64URL string to bytes, rejecting output larger than `max_size`
pub fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // Every 4 input characters yield at most 3 bytes; reject before allocating
    if input.len() / 4 * 3 > max_size {
        return Err(Error::TokenMalformed(format!(
            "segment too large: {} encoded bytes (max decoded: {max_size})",
            input.len()
        )));
    }

    let result = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::TokenMalformed(format!("Base64URL decode failed: {e}")))?;

    if result.len() > max_size {
        return Err(Error::TokenMalformed(format!(
            "Decoded size exceeds limit: {} bytes (max: {max_size})",
            result.len()
        )));
    }

    Ok(result)
}

/// Decode a Base64URL string to a UTF-8 string with size limit
pub fn decode_string(input: &str, max_size: usize) -> Result<String> {
    decode_bytes(input, max_size).and_then(|bytes| {
        String::from_utf8(bytes).map_err(|e| Error::TokenMalformed(format!("Invalid UTF-8: {e}")))
    })
}
