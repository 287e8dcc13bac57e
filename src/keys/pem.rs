//! PEM loading for RSA and ECDSA keys
//!
//! Accepted blocks:
//! - `PRIVATE KEY` (PKCS#8) for RSA and ECDSA private keys
//! - `RSA PRIVATE KEY` (PKCS#1) for RSA private keys
//! - `PUBLIC KEY` (SubjectPublicKeyInfo) for RSA and ECDSA public keys
//! - `RSA PUBLIC KEY` (PKCS#1) for RSA public keys

#[cfg(feature = "ecdsa")]
use super::{EcdsaCurve, EcdsaPrivateKey, EcdsaPublicKey};
#[cfg(feature = "rsa")]
use super::{RsaPrivateKey, RsaPublicKey};
use super::{PrivateKey, PublicKey};
use crate::error::{Error, Result};

fn parse_block(input: &str) -> Result<::pem::Pem> {
    ::pem::parse(input).map_err(|e| Error::InvalidKey(format!("failed to decode PEM block: {e}")))
}

fn unexpected_tag(found: &str, expected: &[&str]) -> Error {
    Error::InvalidKey(format!(
        "unexpected PEM block '{found}', expected one of {expected:?}"
    ))
}

impl PrivateKey {
    /// Load an RSA private key from a `PRIVATE KEY` or `RSA PRIVATE KEY` block
    #[cfg(feature = "rsa")]
    pub fn rsa_from_pem(input: &str) -> Result<Self> {
        let block = parse_block(input)?;
        let key = match block.tag() {
            "PRIVATE KEY" => RsaPrivateKey::from_pkcs8_der(block.contents())?,
            "RSA PRIVATE KEY" => RsaPrivateKey::from_pkcs1_der(block.contents())?,
            other => return Err(unexpected_tag(other, &["PRIVATE KEY", "RSA PRIVATE KEY"])),
        };
        Ok(PrivateKey::Rsa(key))
    }

    /// Load an ECDSA private key on `curve` from a `PRIVATE KEY` block
    #[cfg(feature = "ecdsa")]
    pub fn ecdsa_from_pem(input: &str, curve: EcdsaCurve) -> Result<Self> {
        let block = parse_block(input)?;
        match block.tag() {
            "PRIVATE KEY" => Ok(PrivateKey::Ecdsa(EcdsaPrivateKey::from_pkcs8_der(
                curve,
                block.contents(),
            )?)),
            other => Err(unexpected_tag(other, &["PRIVATE KEY"])),
        }
    }
}

impl PublicKey {
    /// Load an RSA public key from a `PUBLIC KEY` or `RSA PUBLIC KEY` block
    #[cfg(feature = "rsa")]
    pub fn rsa_from_pem(input: &str) -> Result<Self> {
        let block = parse_block(input)?;
        match block.tag() {
            "PUBLIC KEY" | "RSA PUBLIC KEY" => {
                Ok(PublicKey::Rsa(RsaPublicKey::new(block.contents().to_vec())))
            }
            other => Err(unexpected_tag(other, &["PUBLIC KEY", "RSA PUBLIC KEY"])),
        }
    }

    /// Load an ECDSA public key on `curve` from a `PUBLIC KEY` block
    #[cfg(feature = "ecdsa")]
    pub fn ecdsa_from_pem(input: &str, curve: EcdsaCurve) -> Result<Self> {
        let block = parse_block(input)?;
        match block.tag() {
            "PUBLIC KEY" => Ok(PublicKey::Ecdsa(EcdsaPublicKey::new(
                block.contents().to_vec(),
                curve,
            ))),
            other => Err(unexpected_tag(other, &["PUBLIC KEY"])),
        }
    }
}
