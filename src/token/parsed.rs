use serde::de::DeserializeOwned;

use crate::algorithm::Registry;
use crate::error::{Error, Result};
use crate::limits::{MAX_ALG_LENGTH, MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_TOKEN_LENGTH};
use crate::token::{RawToken, Token, TokenHeader};
use crate::utils::base64url;

/// Decode a compact token into header, claims and signing method
///
/// Nothing is verified here: the returned token is never valid. Any
/// structural problem, and an `alg` the registry cannot resolve, is
/// reported as [`Error::TokenMalformed`].
///
/// # Example
/// ```ignore
/// let token: Token<MapClaims> = parse_raw_token("eyJ...", &Registry::default())?;
/// ```
pub fn parse_raw_token<C: DeserializeOwned>(
    raw: impl Into<RawToken>,
    registry: &Registry,
) -> Result<Token<C>> {
    let raw = raw.into();

    if raw.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: raw.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }

    let (header_b64, payload_b64) = {
        let parts: Vec<&str> = raw.as_str().split('.').collect();
        if parts.len() != 3 {
            return Err(Error::TokenMalformed(format!(
                "expected 3 segments, found {}",
                parts.len()
            )));
        }
        (parts[0], parts[1])
    };

    let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)?;
    let header: TokenHeader = serde_json::from_str(&header_json)
        .map_err(|e| Error::TokenMalformed(format!("Failed to parse header: {e}")))?;

    let payload_json = base64url::decode_bytes(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
    let claims: C = serde_json::from_slice(&payload_json)
        .map_err(|e| Error::TokenMalformed(format!("Failed to parse claims: {e}")))?;

    if header.algorithm.len() > MAX_ALG_LENGTH {
        return Err(Error::TokenMalformed(format!(
            "algorithm name longer than {MAX_ALG_LENGTH} bytes"
        )));
    }
    let method = registry.get(&header.algorithm).ok_or_else(|| {
        Error::TokenMalformed(format!("unknown signing method '{}'", header.algorithm))
    })?;

    tracing::trace!(alg = %header.algorithm, "parsed token");
    Ok(Token::new(raw, header, claims, method))
}
