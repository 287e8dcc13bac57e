//! Token validation
//!
//! A [`Validator`] is bound to exactly one signing method. Validating a raw
//! token runs these steps in order:
//!
//! 1. Parse the token (any structural failure aborts immediately)
//! 2. Compare the header `alg` with the configured method; a mismatch aborts
//!    with [`Error::TokenUnverifiable`] before any key is touched
//! 3. Run every claims check
//! 4. Verify the signature over the exact bytes before the last `.`
//!
//! Failures from steps 3 and 4 are collected and returned together as
//! [`Error::Validation`], so a caller learns both that a token expired and
//! that its audience was wrong.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::algorithm::{Registry, SigningMethod};
use crate::claims::{ClaimsSet, ClaimsValidation, NumericDate};
use crate::error::{Error, Result};
use crate::keys::PublicKey;
use crate::token::{RawToken, Token, parse_raw_token};

/// Claims and signature validator for one signing method
#[derive(Debug, Clone)]
pub struct Validator {
    claims: ClaimsValidation,
    method: Arc<dyn SigningMethod>,
    registry: Arc<Registry>,
}

impl Validator {
    /// Validator for tokens signed with `method`
    ///
    /// Starts with no clock skew margin, the iat check off, no expected
    /// audience/issuer/subject, and a registry of every built-in method.
    pub fn new(method: Arc<dyn SigningMethod>) -> Self {
        Self {
            claims: ClaimsValidation::default(),
            method,
            registry: Arc::new(Registry::default()),
        }
    }

    /// Resolve header algorithms through `registry`
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the whole claims configuration
    pub fn with_claims_validation(mut self, claims: ClaimsValidation) -> Self {
        self.claims = claims;
        self
    }

    /// Set clock skew tolerance
    pub fn margin(mut self, margin: Duration) -> Self {
        self.claims = self.claims.margin(margin);
        self
    }

    /// Enable or disable the issued-at check
    pub fn validate_iat(mut self, enabled: bool) -> Self {
        self.claims = self.claims.validate_iat(enabled);
        self
    }

    /// Require `aud` to equal `audience`; an empty string disables the check
    pub fn expected_audience(mut self, audience: impl Into<String>) -> Self {
        self.claims = self.claims.expected_audience(audience);
        self
    }

    /// Require `iss` to equal `issuer`; an empty string disables the check
    pub fn expected_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.claims = self.claims.expected_issuer(issuer);
        self
    }

    /// Require `sub` to equal `subject`; an empty string disables the check
    pub fn expected_subject(mut self, subject: impl Into<String>) -> Self {
        self.claims = self.claims.expected_subject(subject);
        self
    }

    pub fn method(&self) -> &Arc<dyn SigningMethod> {
        &self.method
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn claims_validation(&self) -> &ClaimsValidation {
        &self.claims
    }

    /// Run every claims check against the current time
    pub fn validate_claims<C: ClaimsSet + ?Sized>(&self, claims: &C) -> Result<()> {
        self.validate_claims_at(claims, NumericDate::now())
    }

    /// Run every claims check as of `now`
    pub fn validate_claims_at<C: ClaimsSet + ?Sized>(
        &self,
        claims: &C,
        now: NumericDate,
    ) -> Result<()> {
        let errors = self.claims.validate(claims, now);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(errors))
        }
    }

    /// Parse and fully validate `raw` against the current time
    pub fn validate_token<C>(&self, raw: impl Into<RawToken>, key: &PublicKey) -> Result<Token<C>>
    where
        C: ClaimsSet + DeserializeOwned,
    {
        self.validate_token_at(raw, key, NumericDate::now())
    }

    /// Parse and fully validate `raw` as of `now`
    pub fn validate_token_at<C>(
        &self,
        raw: impl Into<RawToken>,
        key: &PublicKey,
        now: NumericDate,
    ) -> Result<Token<C>>
    where
        C: ClaimsSet + DeserializeOwned,
    {
        let token: Token<C> = parse_raw_token(raw, &self.registry)?;

        // Algorithm confusion guard: never verify with a method the token did not name
        let found = token.header().algorithm_str();
        let expected = self.method.name();
        if found != expected {
            tracing::warn!(found, expected, "token algorithm does not match validator");
            return Err(Error::TokenUnverifiable {
                found: found.to_string(),
                expected: expected.to_string(),
            });
        }

        let mut errors = self.claims.validate(token.claims(), now);

        if let Err(cause) = self
            .method
            .verify(token.signing_input(), token.signature(), key)
        {
            tracing::warn!(alg = expected, error = %cause, "token signature rejected");
            errors.push(Error::TokenSignatureInvalid(Box::new(cause)));
        }

        if !errors.is_empty() {
            tracing::debug!(alg = expected, %errors, "token rejected");
            return Err(Error::Validation(errors));
        }

        tracing::debug!(alg = expected, "token validated");
        Ok(token.mark_valid())
    }
}
