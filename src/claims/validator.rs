use std::time::Duration;

use crate::claims::{ClaimError, ClaimResult, ClaimsSet, NumericDate};
use crate::error::{Error, ValidationErrors};

/// Configuration for claims validation
///
/// Every check runs on every call; failures are collected rather than
/// returned one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimsValidation {
    /// Clock skew tolerance applied to exp, nbf and iat (whole seconds)
    margin: Duration,

    /// Check the issued-at claim (off by default)
    validate_iat: bool,

    expected_audience: Option<String>,
    expected_issuer: Option<String>,
    expected_subject: Option<String>,
}

/// An empty expectation disables the check
fn expectation(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.is_empty()).then_some(value)
}

impl ClaimsValidation {
    /// Create a new validation config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clock skew tolerance
    pub fn margin(mut self, margin: Duration) -> Self {
        self.margin = margin;
        self
    }

    /// Enable or disable the issued-at check
    pub fn validate_iat(mut self, enabled: bool) -> Self {
        self.validate_iat = enabled;
        self
    }

    /// Require `aud` to equal `audience`; an empty string disables the check
    pub fn expected_audience(mut self, audience: impl Into<String>) -> Self {
        self.expected_audience = expectation(audience);
        self
    }

    /// Require `iss` to equal `issuer`; an empty string disables the check
    pub fn expected_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = expectation(issuer);
        self
    }

    /// Require `sub` to equal `subject`; an empty string disables the check
    pub fn expected_subject(mut self, subject: impl Into<String>) -> Self {
        self.expected_subject = expectation(subject);
        self
    }

    /// Clock skew tolerance set with [`margin`](Self::margin)
    pub fn skew_margin(&self) -> Duration {
        self.margin
    }

    /// Whether [`validate_iat`](Self::validate_iat) is on
    pub fn checks_iat(&self) -> bool {
        self.validate_iat
    }

    /// Check `claims` as of `now`, collecting every failure
    pub fn validate<C: ClaimsSet + ?Sized>(&self, claims: &C, now: NumericDate) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        let margin = i64::try_from(self.margin.as_secs()).unwrap_or(i64::MAX);
        let margin_secs = self.margin.as_secs();
        let now_secs = now.as_unix();

        // exp: valid while now < exp + margin
        if let Some(expired_at) = failing_date(claims.expiration(), |exp| {
            now_secs < exp.as_unix().saturating_add(margin)
        }) {
            errors.push(Error::TokenExpired {
                expired_at,
                now: now_secs,
                margin: margin_secs,
            });
        }

        // nbf: valid once now >= nbf - margin
        if let Some(not_before) = failing_date(claims.not_before(), |nbf| {
            now_secs >= nbf.as_unix().saturating_sub(margin)
        }) {
            errors.push(Error::TokenNotValidYet {
                not_before,
                now: now_secs,
                margin: margin_secs,
            });
        }

        if self.validate_iat {
            if let Some(issued_at) = failing_date(claims.issued_at(), |iat| {
                now_secs >= iat.as_unix().saturating_sub(margin)
            }) {
                errors.push(Error::TokenUsedBeforeIssued {
                    issued_at,
                    now: now_secs,
                    margin: margin_secs,
                });
            }
        }

        if let Some((expected, found)) = failing_string(&self.expected_audience, claims.audience()) {
            errors.push(Error::TokenInvalidAudience { expected, found });
        }

        if let Some((expected, found)) = failing_string(&self.expected_issuer, claims.issuer()) {
            errors.push(Error::TokenInvalidIssuer { expected, found });
        }

        if let Some((expected, found)) = failing_string(&self.expected_subject, claims.subject()) {
            errors.push(Error::TokenInvalidSubject { expected, found });
        }

        if let Some(custom) = claims.as_custom() {
            match custom.validate() {
                Ok(()) | Err(ClaimError::Skip) => {}
                Err(cause) => errors.push(Error::TokenInvalidCustomClaims(cause)),
            }
        }

        errors
    }
}

/// Evaluate a time claim; `Some` carries the offending timestamp on failure
///
/// Time claims are optional: a missing or skipped claim passes. A claim of
/// the wrong type fails without a timestamp.
fn failing_date(
    claim: ClaimResult<NumericDate>,
    passes: impl FnOnce(NumericDate) -> bool,
) -> Option<Option<i64>> {
    match claim {
        Ok(date) if passes(date) => None,
        Ok(date) => Some(Some(date.as_unix())),
        Err(ClaimError::Skip | ClaimError::Missing(_)) => None,
        Err(_) => Some(None),
    }
}

/// Evaluate a string claim against an optional expectation
///
/// With an expectation set, a missing claim fails.
fn failing_string(
    expected: &Option<String>,
    claim: ClaimResult<&str>,
) -> Option<(String, Option<String>)> {
    let expected = expected.as_ref()?;
    match claim {
        Ok(found) if found == expected => None,
        Ok(found) => Some((expected.clone(), Some(found.to_string()))),
        Err(ClaimError::Skip) => None,
        Err(_) => Some((expected.clone(), None)),
    }
}
