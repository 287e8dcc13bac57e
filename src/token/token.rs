use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::algorithm::{Registry, SigningMethod};
use crate::claims::MapClaims;
use crate::error::Result;
use crate::token::{RawToken, TokenHeader, parse_raw_token};

/// A decoded token
///
/// Parsing alone produces a token with `is_valid() == false`. Only the
/// validator, after every claims check and the signature check pass, hands
/// out tokens marked valid.
#[derive(Debug, Clone)]
pub struct Token<C = MapClaims> {
    raw: RawToken,
    header: TokenHeader,
    claims: C,
    method: Arc<dyn SigningMethod>,
    valid: bool,
}

impl<C> Token<C> {
    pub(crate) fn new(
        raw: RawToken,
        header: TokenHeader,
        claims: C,
        method: Arc<dyn SigningMethod>,
    ) -> Self {
        Self {
            raw,
            header,
            claims,
            method,
            valid: false,
        }
    }

    pub(crate) fn mark_valid(mut self) -> Self {
        self.valid = true;
        self
    }

    /// The token exactly as received
    pub fn raw(&self) -> &RawToken {
        &self.raw
    }

    /// Get the token header
    pub fn header(&self) -> &TokenHeader {
        &self.header
    }

    /// Get the decoded claims
    pub fn claims(&self) -> &C {
        &self.claims
    }

    pub fn into_claims(self) -> C {
        self.claims
    }

    /// Method resolved from the header's `alg`
    pub fn method(&self) -> &Arc<dyn SigningMethod> {
        &self.method
    }

    /// Base64URL signature segment, verbatim
    pub fn signature(&self) -> &str {
        self.raw.signature()
    }

    /// Get the signing input (header.payload)
    pub fn signing_input(&self) -> &str {
        self.raw.signing_input()
    }

    /// Whether claims and signature have been validated
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl<C: DeserializeOwned> Token<C> {
    /// Decode `raw` without verifying anything
    pub fn parse(raw: impl Into<RawToken>, registry: &Registry) -> Result<Self> {
        parse_raw_token(raw, registry)
    }
}
