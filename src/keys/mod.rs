//! Key material for signing and verification
//!
//! Signing methods take a [`PrivateKey`] and verify against a [`PublicKey`].
//! Both are closed enums over the supported families:
//! - HMAC shared secrets (same bytes on both sides)
//! - RSA key pairs (used by both PKCS#1 v1.5 and PSS methods)
//! - ECDSA key pairs on P-256, P-384 and P-521
//!
//! Asking a key for the wrong family yields [`Error::InvalidKeyType`].

#[cfg(any(feature = "rsa", feature = "ecdsa"))]
mod pem;

use std::fmt;
#[cfg(any(feature = "rsa", feature = "ecdsa"))]
use std::sync::Arc;

#[cfg(feature = "ecdsa")]
use aws_lc_rs::signature::{self, EcdsaKeyPair};
#[cfg(feature = "rsa")]
use aws_lc_rs::signature::RsaKeyPair;
#[cfg(any(feature = "rsa", feature = "ecdsa"))]
use aws_lc_rs::signature::KeyPair as _;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Key used to produce signatures
#[derive(Debug, Clone)]
pub enum PrivateKey {
    /// Shared secret for HMAC methods
    Hmac(SymmetricKey),

    /// RSA private key for RS*/PS* methods
    #[cfg(feature = "rsa")]
    Rsa(RsaPrivateKey),

    /// ECDSA private key for ES* methods
    #[cfg(feature = "ecdsa")]
    Ecdsa(EcdsaPrivateKey),
}

/// Key used to check signatures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    /// Shared secret for HMAC methods
    Hmac(SymmetricKey),

    /// RSA public key for RS*/PS* methods
    #[cfg(feature = "rsa")]
    Rsa(RsaPublicKey),

    /// ECDSA public key for ES* methods
    #[cfg(feature = "ecdsa")]
    Ecdsa(EcdsaPublicKey),
}

/// Matching private and public halves produced by a signing method
#[derive(Debug, Clone)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Pair a private key with its public half
    pub fn new(private_key: PrivateKey, public_key: PublicKey) -> Self {
        Self {
            private_key,
            public_key,
        }
    }

    /// Build a pair from a private key, deriving the public half
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self::new(private_key, public_key)
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn into_parts(self) -> (PrivateKey, PublicKey) {
        (self.private_key, self.public_key)
    }
}

impl PrivateKey {
    /// Create an HMAC secret from bytes
    pub fn hmac(secret: impl Into<SymmetricKey>) -> Self {
        PrivateKey::Hmac(secret.into())
    }

    /// Derive the public half of this key
    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Hmac(secret) => PublicKey::Hmac(secret.clone()),
            #[cfg(feature = "rsa")]
            PrivateKey::Rsa(key) => PublicKey::Rsa(key.public_key()),
            #[cfg(feature = "ecdsa")]
            PrivateKey::Ecdsa(key) => PublicKey::Ecdsa(key.public_key()),
        }
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            PrivateKey::Hmac(_) => "HMAC",
            #[cfg(feature = "rsa")]
            PrivateKey::Rsa(_) => "RSA",
            #[cfg(feature = "ecdsa")]
            PrivateKey::Ecdsa(_) => "ECDSA",
        }
    }

    /// Get as HMAC secret or return error
    #[allow(unreachable_patterns)]
    pub fn as_hmac(&self, method: &str) -> Result<&SymmetricKey> {
        match self {
            PrivateKey::Hmac(key) => Ok(key),
            _ => Err(key_type_mismatch(method, "HMAC", self.key_type())),
        }
    }

    /// Get as RSA private key or return error
    #[cfg(feature = "rsa")]
    #[allow(unreachable_patterns)]
    pub fn as_rsa(&self, method: &str) -> Result<&RsaPrivateKey> {
        match self {
            PrivateKey::Rsa(key) => Ok(key),
            _ => Err(key_type_mismatch(method, "RSA", self.key_type())),
        }
    }

    /// Get as ECDSA private key or return error
    #[cfg(feature = "ecdsa")]
    #[allow(unreachable_patterns)]
    pub fn as_ecdsa(&self, method: &str) -> Result<&EcdsaPrivateKey> {
        match self {
            PrivateKey::Ecdsa(key) => Ok(key),
            _ => Err(key_type_mismatch(method, "ECDSA", self.key_type())),
        }
    }
}

impl PublicKey {
    /// Create an HMAC secret from bytes
    pub fn hmac(secret: impl Into<SymmetricKey>) -> Self {
        PublicKey::Hmac(secret.into())
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            PublicKey::Hmac(_) => "HMAC",
            #[cfg(feature = "rsa")]
            PublicKey::Rsa(_) => "RSA",
            #[cfg(feature = "ecdsa")]
            PublicKey::Ecdsa(_) => "ECDSA",
        }
    }

    /// Get as HMAC secret or return error
    #[allow(unreachable_patterns)]
    pub fn as_hmac(&self, method: &str) -> Result<&SymmetricKey> {
        match self {
            PublicKey::Hmac(key) => Ok(key),
            _ => Err(key_type_mismatch(method, "HMAC", self.key_type())),
        }
    }

    /// Get as RSA public key or return error
    #[cfg(feature = "rsa")]
    #[allow(unreachable_patterns)]
    pub fn as_rsa(&self, method: &str) -> Result<&RsaPublicKey> {
        match self {
            PublicKey::Rsa(key) => Ok(key),
            _ => Err(key_type_mismatch(method, "RSA", self.key_type())),
        }
    }

    /// Get as ECDSA public key or return error
    #[cfg(feature = "ecdsa")]
    #[allow(unreachable_patterns)]
    pub fn as_ecdsa(&self, method: &str) -> Result<&EcdsaPublicKey> {
        match self {
            PublicKey::Ecdsa(key) => Ok(key),
            _ => Err(key_type_mismatch(method, "ECDSA", self.key_type())),
        }
    }
}

pub(crate) fn key_type_mismatch(method: &str, expected: &str, found: &str) -> Error {
    Error::InvalidKeyType {
        method: method.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

/// Shared secret for HMAC methods, wiped from memory on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    /// Create a new symmetric key
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }

    pub fn len(&self) -> usize {
        self.secret.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for SymmetricKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SymmetricKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for SymmetricKey {
    fn from(secret: &[u8; N]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for SymmetricKey {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for SymmetricKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

// ============================================================================
// RSA
// ============================================================================

/// RSA private key (shared by the PKCS#1 v1.5 and PSS methods)
#[cfg(feature = "rsa")]
#[derive(Clone)]
pub struct RsaPrivateKey {
    inner: Arc<RsaKeyPair>,
}

#[cfg(feature = "rsa")]
impl RsaPrivateKey {
    pub(crate) fn from_key_pair(key_pair: RsaKeyPair) -> Self {
        Self {
            inner: Arc::new(key_pair),
        }
    }

    /// Load from DER-encoded PKCS#8 `PrivateKeyInfo`
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        RsaKeyPair::from_pkcs8(der)
            .map(Self::from_key_pair)
            .map_err(|e| Error::InvalidKey(format!("RSA PKCS#8 key rejected: {e}")))
    }

    /// Load from DER-encoded PKCS#1 `RSAPrivateKey`
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self> {
        RsaKeyPair::from_der(der)
            .map(Self::from_key_pair)
            .map_err(|e| Error::InvalidKey(format!("RSA PKCS#1 key rejected: {e}")))
    }

    /// Public half as a PKCS#1 DER `RSAPublicKey`
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey::new(self.inner.public_key().as_ref().to_vec())
    }

    /// Modulus length in bytes, which is also the signature length
    pub fn modulus_len(&self) -> usize {
        self.inner.public_modulus_len()
    }

    pub(crate) fn key_pair(&self) -> &RsaKeyPair {
        &self.inner
    }
}

#[cfg(feature = "rsa")]
impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("modulus_bits", &(self.modulus_len() * 8))
            .finish_non_exhaustive()
    }
}

/// RSA public key (DER-encoded PKCS#1 `RSAPublicKey` or SubjectPublicKeyInfo)
#[cfg(feature = "rsa")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    der: Vec<u8>,
}

#[cfg(feature = "rsa")]
impl RsaPublicKey {
    /// Create a new RSA public key from DER bytes
    pub fn new(der: Vec<u8>) -> Self {
        Self { der }
    }

    /// Get the DER-encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }
}

// ============================================================================
// ECDSA
// ============================================================================

/// ECDSA curve identifier
#[cfg(feature = "ecdsa")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcdsaCurve {
    /// P-256 (secp256r1) curve
    P256,
    /// P-384 (secp384r1) curve
    P384,
    /// P-521 (secp521r1) curve
    P521,
}

#[cfg(feature = "ecdsa")]
impl EcdsaCurve {
    pub fn name(&self) -> &'static str {
        match self {
            EcdsaCurve::P256 => "P-256",
            EcdsaCurve::P384 => "P-384",
            EcdsaCurve::P521 => "P-521",
        }
    }

    /// Signing algorithm pairing this curve with its conventional hash
    pub(crate) fn signing_algorithm(&self) -> &'static signature::EcdsaSigningAlgorithm {
        match self {
            EcdsaCurve::P256 => &signature::ECDSA_P256_SHA256_ASN1_SIGNING,
            EcdsaCurve::P384 => &signature::ECDSA_P384_SHA384_ASN1_SIGNING,
            EcdsaCurve::P521 => &signature::ECDSA_P521_SHA512_ASN1_SIGNING,
        }
    }
}

#[cfg(feature = "ecdsa")]
impl fmt::Display for EcdsaCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// ECDSA private key bound to one curve
#[cfg(feature = "ecdsa")]
#[derive(Clone)]
pub struct EcdsaPrivateKey {
    inner: Arc<EcdsaKeyPair>,
    curve: EcdsaCurve,
}

#[cfg(feature = "ecdsa")]
impl EcdsaPrivateKey {
    pub(crate) fn from_key_pair(key_pair: EcdsaKeyPair, curve: EcdsaCurve) -> Self {
        Self {
            inner: Arc::new(key_pair),
            curve,
        }
    }

    /// Load from DER-encoded PKCS#8 `PrivateKeyInfo` on `curve`
    pub fn from_pkcs8_der(curve: EcdsaCurve, der: &[u8]) -> Result<Self> {
        EcdsaKeyPair::from_pkcs8(curve.signing_algorithm(), der)
            .map(|key_pair| Self::from_key_pair(key_pair, curve))
            .map_err(|e| Error::InvalidKey(format!("ECDSA {curve} PKCS#8 key rejected: {e}")))
    }

    /// Public half as an uncompressed SEC1 point
    pub fn public_key(&self) -> EcdsaPublicKey {
        EcdsaPublicKey::new(self.inner.public_key().as_ref().to_vec(), self.curve)
    }

    /// Get the curve
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    pub(crate) fn key_pair(&self) -> &EcdsaKeyPair {
        &self.inner
    }
}

#[cfg(feature = "ecdsa")]
impl fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaPrivateKey")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

/// ECDSA public key (SEC1 point or DER-encoded SubjectPublicKeyInfo)
#[cfg(feature = "ecdsa")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdsaPublicKey {
    der: Vec<u8>,
    curve: EcdsaCurve,
}

#[cfg(feature = "ecdsa")]
impl EcdsaPublicKey {
    /// Create a new ECDSA public key from encoded bytes
    pub fn new(der: Vec<u8>, curve: EcdsaCurve) -> Self {
        Self { der, curve }
    }

    /// Get the encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Get the curve
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }
}
