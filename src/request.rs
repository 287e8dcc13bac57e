//! Pulling raw tokens out of HTTP requests
//!
//! Two sources are supported: an `Authorization: Bearer <token>` header
//! (scheme matched case-insensitively) and a named cookie.

use http::HeaderMap;
use http::header::{AUTHORIZATION, COOKIE};

use crate::error::{Error, Result};
use crate::token::RawToken;

const BEARER_PREFIX: &str = "bearer ";

/// Token from the `Authorization: Bearer` header
pub fn extract_token_from_headers(headers: &HeaderMap) -> Result<RawToken> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(Error::NoTokenInRequest)?;

    let has_prefix = value
        .get(..BEARER_PREFIX.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX));
    if !has_prefix {
        return Err(Error::NoTokenInRequest);
    }

    let token = &value[BEARER_PREFIX.len()..];
    if token.is_empty() {
        return Err(Error::NoTokenInRequest);
    }
    Ok(RawToken::from(token))
}

/// Token from the cookie called `name`
pub fn extract_token_from_cookie(name: &str, headers: &HeaderMap) -> Result<RawToken> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(cookie, _)| *cookie == name)
        .map(|(_, value)| RawToken::from(unquote(value)))
        .ok_or_else(|| Error::NoCookieFound(name.to_string()))
}

/// Bearer header first, then the cookie called `cookie_name`
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Result<RawToken> {
    match extract_token_from_headers(headers) {
        Err(Error::NoTokenInRequest) => extract_token_from_cookie(cookie_name, headers),
        found => found,
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}
