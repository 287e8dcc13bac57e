//! Errors for jwtsmith

use std::fmt;

use thiserror::Error;

use crate::claims::ClaimError;

/// Convenient result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// jwtsmith errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Token is malformed: {0}")]
    TokenMalformed(String),

    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Claims could not be encoded: {0}")]
    ClaimsEncoding(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Token is unverifiable: signed with '{found}', expected '{expected}'")]
    TokenUnverifiable { found: String, expected: String },

    #[error("Hash function is unavailable for signing method '{method}'")]
    HashUnavailable { method: String },

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Token signature is invalid: {0}")]
    TokenSignatureInvalid(#[source] Box<Error>),

    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Key Errors
    // ============================================================================
    #[error("Key type mismatch for '{method}': expected {expected} key, got {found} key")]
    InvalidKeyType {
        method: String,
        expected: String,
        found: String,
    },

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Cryptographic operation failed: {0}")]
    Crypto(String),

    // ============================================================================
    // Claims Errors
    // ============================================================================
    #[error("Token expired at {} (now: {now}, margin: {margin}s)", describe_instant(.expired_at))]
    TokenExpired {
        expired_at: Option<i64>,
        now: i64,
        margin: u64,
    },

    #[error("Token not valid until {} (now: {now}, margin: {margin}s)", describe_instant(.not_before))]
    TokenNotValidYet {
        not_before: Option<i64>,
        now: i64,
        margin: u64,
    },

    #[error("Token used before issued at {} (now: {now}, margin: {margin}s)", describe_instant(.issued_at))]
    TokenUsedBeforeIssued {
        issued_at: Option<i64>,
        now: i64,
        margin: u64,
    },

    #[error("Token audience mismatch: expected '{expected}', found {found:?}")]
    TokenInvalidAudience {
        expected: String,
        found: Option<String>,
    },

    #[error("Token issuer mismatch: expected '{expected}', found {found:?}")]
    TokenInvalidIssuer {
        expected: String,
        found: Option<String>,
    },

    #[error("Token subject mismatch: expected '{expected}', found {found:?}")]
    TokenInvalidSubject {
        expected: String,
        found: Option<String>,
    },

    #[error("Token custom claims are invalid: {0}")]
    TokenInvalidCustomClaims(#[source] ClaimError),

    #[error("Token is invalid: {0}")]
    Validation(ValidationErrors),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("No bearer token found in request")]
    NoTokenInRequest,

    #[error("No cookie named '{0}' found in request")]
    NoCookieFound(String),
}

fn describe_instant(instant: &Option<i64>) -> String {
    match instant {
        Some(seconds) => seconds.to_string(),
        None => "<unreadable>".to_string(),
    }
}

/// Fieldless mirror of [`Error`] for matching without destructuring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TokenMalformed,
    ClaimsEncoding,
    TokenUnverifiable,
    HashUnavailable,
    TokenSignatureInvalid,
    SignatureInvalid,
    InvalidKeyType,
    InvalidKey,
    Crypto,
    TokenExpired,
    TokenNotValidYet,
    TokenUsedBeforeIssued,
    TokenInvalidAudience,
    TokenInvalidIssuer,
    TokenInvalidSubject,
    TokenInvalidCustomClaims,
    Validation,
    NoTokenInRequest,
    NoCookieFound,
}

impl Error {
    /// Kind of this error, without looking inside composite errors
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TokenMalformed(_) | Error::TokenTooLarge { .. } => ErrorKind::TokenMalformed,
            Error::ClaimsEncoding(_) => ErrorKind::ClaimsEncoding,
            Error::TokenUnverifiable { .. } => ErrorKind::TokenUnverifiable,
            Error::HashUnavailable { .. } => ErrorKind::HashUnavailable,
            Error::TokenSignatureInvalid(_) => ErrorKind::TokenSignatureInvalid,
            Error::SignatureInvalid => ErrorKind::SignatureInvalid,
            Error::InvalidKeyType { .. } => ErrorKind::InvalidKeyType,
            Error::InvalidKey(_) => ErrorKind::InvalidKey,
            Error::Crypto(_) => ErrorKind::Crypto,
            Error::TokenExpired { .. } => ErrorKind::TokenExpired,
            Error::TokenNotValidYet { .. } => ErrorKind::TokenNotValidYet,
            Error::TokenUsedBeforeIssued { .. } => ErrorKind::TokenUsedBeforeIssued,
            Error::TokenInvalidAudience { .. } => ErrorKind::TokenInvalidAudience,
            Error::TokenInvalidIssuer { .. } => ErrorKind::TokenInvalidIssuer,
            Error::TokenInvalidSubject { .. } => ErrorKind::TokenInvalidSubject,
            Error::TokenInvalidCustomClaims(_) => ErrorKind::TokenInvalidCustomClaims,
            Error::Validation(_) => ErrorKind::Validation,
            Error::NoTokenInRequest => ErrorKind::NoTokenInRequest,
            Error::NoCookieFound(_) => ErrorKind::NoCookieFound,
        }
    }

    /// Whether this error, or any error it wraps or aggregates, is of `kind`
    pub fn is(&self, kind: ErrorKind) -> bool {
        if self.kind() == kind {
            return true;
        }
        match self {
            Error::TokenSignatureInvalid(cause) => cause.is(kind),
            Error::Validation(errors) => errors.contains(kind),
            _ => false,
        }
    }
}

/// Every failure found while validating one token
///
/// Claims checks and the signature check all run; their failures are
/// collected here instead of stopping at the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(Vec<Error>);

impl ValidationErrors {
    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, error: Error) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }

    /// Whether any collected error is of `kind` (searching wrapped errors too)
    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.0.iter().any(|error| error.is(kind))
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
