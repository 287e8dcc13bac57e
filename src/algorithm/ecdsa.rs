use crate::algorithm::{HashAlgorithm, SigningMethod};
use crate::error::{Error, Result};
use crate::keys::{EcdsaCurve, EcdsaPrivateKey, KeyPair, PrivateKey, PublicKey, key_type_mismatch};
use crate::limits::MAX_DECODED_SIGNATURE_SIZE;
use crate::utils::base64url;

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, EcdsaKeyPair, UnparsedPublicKey};

/// ECDSA signing method over one curve and hash
///
/// Signatures are ASN.1 DER `Ecdsa-Sig-Value` structures, Base64URL-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaMethod {
    name: &'static str,
    curve: EcdsaCurve,
    hash: HashAlgorithm,
}

/// ES256 method (ECDSA with P-256 and SHA-256)
pub const ES256: EcdsaMethod = EcdsaMethod::new("ES256", EcdsaCurve::P256, HashAlgorithm::Sha256);

/// ES384 method (ECDSA with P-384 and SHA-384)
pub const ES384: EcdsaMethod = EcdsaMethod::new("ES384", EcdsaCurve::P384, HashAlgorithm::Sha384);

/// ES512 method (ECDSA with P-521 and SHA-512)
pub const ES512: EcdsaMethod = EcdsaMethod::new("ES512", EcdsaCurve::P521, HashAlgorithm::Sha512);

impl EcdsaMethod {
    pub const fn new(name: &'static str, curve: EcdsaCurve, hash: HashAlgorithm) -> Self {
        Self { name, curve, hash }
    }

    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// Backend algorithms for this curve/hash pairing
    ///
    /// Only the conventional pairings are available; anything else is
    /// `HashUnavailable`.
    fn algorithms(
        &self,
    ) -> Result<(
        &'static signature::EcdsaSigningAlgorithm,
        &'static signature::EcdsaVerificationAlgorithm,
    )> {
        match (self.curve, self.hash) {
            (EcdsaCurve::P256, HashAlgorithm::Sha256) => Ok((
                &signature::ECDSA_P256_SHA256_ASN1_SIGNING,
                &signature::ECDSA_P256_SHA256_ASN1,
            )),
            (EcdsaCurve::P384, HashAlgorithm::Sha384) => Ok((
                &signature::ECDSA_P384_SHA384_ASN1_SIGNING,
                &signature::ECDSA_P384_SHA384_ASN1,
            )),
            (EcdsaCurve::P521, HashAlgorithm::Sha512) => Ok((
                &signature::ECDSA_P521_SHA512_ASN1_SIGNING,
                &signature::ECDSA_P521_SHA512_ASN1,
            )),
            _ => Err(Error::HashUnavailable {
                method: self.name.to_string(),
            }),
        }
    }

    fn check_curve(&self, curve: EcdsaCurve) -> Result<()> {
        if curve == self.curve {
            Ok(())
        } else {
            Err(key_type_mismatch(
                self.name,
                &format!("ECDSA {}", self.curve),
                &format!("ECDSA {curve}"),
            ))
        }
    }
}

impl SigningMethod for EcdsaMethod {
    fn name(&self) -> &str {
        self.name
    }

    fn generate_key_pair(&self) -> Result<KeyPair> {
        let (signing, _) = self.algorithms()?;
        let key_pair = EcdsaKeyPair::generate(signing)
            .map_err(|_| Error::Crypto(format!("{}: ECDSA key generation failed", self.name)))?;
        Ok(KeyPair::from_private_key(PrivateKey::Ecdsa(
            EcdsaPrivateKey::from_key_pair(key_pair, self.curve),
        )))
    }

    fn sign(&self, signing_input: &str, key: &PrivateKey) -> Result<String> {
        self.algorithms()?;
        let ecdsa_key = key.as_ecdsa(self.name)?;
        self.check_curve(ecdsa_key.curve())?;

        let signature = ecdsa_key
            .key_pair()
            .sign(&SystemRandom::new(), signing_input.as_bytes())
            .map_err(|_| Error::Crypto(format!("{}: ECDSA signing failed", self.name)))?;
        Ok(base64url::encode_bytes(signature.as_ref()))
    }

    fn verify(&self, signing_input: &str, signature: &str, key: &PublicKey) -> Result<()> {
        let (_, verification) = self.algorithms()?;
        let ecdsa_key = key.as_ecdsa(self.name)?;
        self.check_curve(ecdsa_key.curve())?;

        let signature_bytes = base64url::decode_bytes(signature, MAX_DECODED_SIGNATURE_SIZE)?;
        UnparsedPublicKey::new(verification, ecdsa_key.as_der())
            .verify(signing_input.as_bytes(), &signature_bytes)
            .map_err(|_| Error::SignatureInvalid)
    }
}
