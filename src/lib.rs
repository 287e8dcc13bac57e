//! # jwtsmith - JWT Signing, Parsing and Validation
//!
//! **jwtsmith** issues and checks JSON Web Tokens in compact serialization
//! (`header.payload.signature`, each segment Base64URL without padding).
//!
//! ## Overview
//!
//! Every token is produced and checked by a [`SigningMethod`]: a named
//! algorithm (the `alg` header value) that can generate its own key pair,
//! sign a signing input, and verify a signature. Methods are looked up by
//! name through a [`Registry`] when a token is parsed.
//!
//! Validation is done by a [`Validator`] bound to one method. It refuses
//! tokens naming any other algorithm before touching a key, which closes the
//! classic algorithm confusion hole (an HMAC token "verified" with an RSA
//! public key used as the secret). Claims checks and the signature check then
//! all run, and every failure is reported together.
//!
//! [`TokenManager`] bundles a method, a key pair and a validator for the
//! common case of one service issuing and accepting its own tokens.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use jwtsmith::*;
//!
//! let manager = TokenManager::generate(Arc::new(algorithm::rsa::RS512))?
//!     .configure_validator(|v| v.expected_issuer("me"));
//!
//! let raw = manager.generate_token(Some(&RegisteredClaims {
//!     issuer: Some("me".into()),
//!     expires_at: Some(NumericDate::now() + Duration::from_secs(3600)),
//!     ..Default::default()
//! }))?;
//!
//! let token = manager.validate_token(raw)?;
//! assert!(token.is_valid());
//! ```
//!
//! ## Algorithm Support
//!
//! - **HMAC** (always enabled): HS256, HS384, HS512
//! - **RSA PKCS#1 v1.5** (with `rsa` feature): RS256, RS384, RS512
//! - **RSA-PSS** (with `rsa` feature): PS256, PS384, PS512
//! - **ECDSA** (with `ecdsa` feature): ES256, ES384, ES512
//!
//! ECDSA signatures are ASN.1 DER encoded.
//!
//! ## Claims
//!
//! Claims types implement [`ClaimsSet`]. [`RegisteredClaims`] covers the
//! seven registered claims, [`MapClaims`] holds arbitrary JSON, and any type
//! can add its own checks by implementing [`CustomClaimsSet`]. An accessor
//! returning [`ClaimError::Skip`] opts that claim out of validation.
//!
//! Time claims are optional: a token without `exp` does not expire. With an
//! expected audience, issuer or subject configured, the claim must be
//! present and equal.
//!
//! ## Requests
//!
//! With the `http` feature, tokens can be read from an
//! `Authorization: Bearer` header, falling back to a cookie (`token` by
//! default).
//!
//! ## Security
//!
//! - HMAC signatures are compared in constant time
//! - `"none"` never resolves to a signing method
//! - Token and segment sizes are bounded before decoding
//! - HMAC secrets are wiped from memory on drop

// Core modules
pub mod error;
pub(crate) mod limits;
pub mod utils;

// Signing methods and keys
pub mod algorithm;
pub mod keys;

// Claims and validation
pub mod claims;

// Token types
pub mod token;

// Validator and manager (main public API)
pub mod manager;
pub mod validator;

#[cfg(feature = "http")]
pub mod request;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use algorithm::{HashAlgorithm, Registry, SigningMethod};
pub use claims::{
    ClaimError, ClaimResult, ClaimsSet, ClaimsValidation, CustomClaimsSet, MapClaims,
    NumericDate, RegisteredClaims,
};
pub use error::{Error, ErrorKind, Result, ValidationErrors};
pub use keys::{KeyPair, PrivateKey, PublicKey, SymmetricKey};
pub use manager::TokenManager;
pub use token::{RawToken, Token, TokenHeader, new_token, parse_raw_token};
pub use validator::Validator;

#[cfg(feature = "ecdsa")]
pub use keys::EcdsaCurve;

#[cfg(feature = "http")]
pub use request::{extract_token, extract_token_from_cookie, extract_token_from_headers};
