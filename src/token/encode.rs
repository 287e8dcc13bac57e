use serde::Serialize;

use crate::algorithm::SigningMethod;
use crate::error::{Error, Result};
use crate::keys::PrivateKey;
use crate::token::{RawToken, TokenHeader};
use crate::utils::base64url;

/// Encode and sign a token
///
/// `None` claims, or claims that serialize to `null`, produce the empty
/// object `{}`. Claims must otherwise serialize to a JSON object.
pub fn new_token<C: Serialize + ?Sized>(
    method: &dyn SigningMethod,
    claims: Option<&C>,
    key: &PrivateKey,
) -> Result<RawToken> {
    let header = serde_json::to_vec(&TokenHeader::new(method.name()))
        .map_err(|e| Error::ClaimsEncoding(format!("Failed to encode header: {e}")))?;
    let payload = encode_claims(claims)?;

    let signing_input = format!(
        "{}.{}",
        base64url::encode_bytes(&header),
        base64url::encode_bytes(&payload)
    );
    let signature = method.sign(&signing_input, key)?;

    tracing::trace!(alg = method.name(), "signed token");
    Ok(RawToken::new(format!("{signing_input}.{signature}")))
}

fn encode_claims<C: Serialize + ?Sized>(claims: Option<&C>) -> Result<Vec<u8>> {
    let Some(claims) = claims else {
        return Ok(b"{}".to_vec());
    };

    let json = serde_json::to_vec(claims)
        .map_err(|e| Error::ClaimsEncoding(format!("Failed to encode claims: {e}")))?;
    match json.first() {
        Some(b'{') => Ok(json),
        _ if json == b"null" => Ok(b"{}".to_vec()),
        _ => Err(Error::ClaimsEncoding(
            "claims must encode to a JSON object".to_string(),
        )),
    }
}
