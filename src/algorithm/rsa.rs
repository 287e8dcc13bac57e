use crate::algorithm::{HashAlgorithm, SigningMethod};
use crate::error::{Error, Result};
use crate::keys::{KeyPair, PrivateKey, PublicKey, RsaPrivateKey};
use crate::limits::MAX_DECODED_SIGNATURE_SIZE;
use crate::utils::base64url;

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::rsa::KeySize;
use aws_lc_rs::signature::{self, RsaEncoding, RsaKeyPair, UnparsedPublicKey};

/// Modulus size used when a method generates RSA keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RsaKeySize {
    #[default]
    Rsa2048,
    Rsa3072,
    Rsa4096,
    Rsa8192,
}

impl RsaKeySize {
    pub fn bits(&self) -> usize {
        match self {
            RsaKeySize::Rsa2048 => 2048,
            RsaKeySize::Rsa3072 => 3072,
            RsaKeySize::Rsa4096 => 4096,
            RsaKeySize::Rsa8192 => 8192,
        }
    }

    fn backend(&self) -> KeySize {
        match self {
            RsaKeySize::Rsa2048 => KeySize::Rsa2048,
            RsaKeySize::Rsa3072 => KeySize::Rsa3072,
            RsaKeySize::Rsa4096 => KeySize::Rsa4096,
            RsaKeySize::Rsa8192 => KeySize::Rsa8192,
        }
    }
}

/// RSA PKCS#1 v1.5 signing method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaMethod {
    name: &'static str,
    hash: HashAlgorithm,
    key_size: RsaKeySize,
}

/// RS256 method (RSA PKCS#1 v1.5 with SHA-256)
pub const RS256: RsaMethod = RsaMethod::new("RS256", HashAlgorithm::Sha256);

/// RS384 method (RSA PKCS#1 v1.5 with SHA-384)
pub const RS384: RsaMethod = RsaMethod::new("RS384", HashAlgorithm::Sha384);

/// RS512 method (RSA PKCS#1 v1.5 with SHA-512)
pub const RS512: RsaMethod = RsaMethod::new("RS512", HashAlgorithm::Sha512);

impl RsaMethod {
    pub const fn new(name: &'static str, hash: HashAlgorithm) -> Self {
        Self {
            name,
            hash,
            key_size: RsaKeySize::Rsa2048,
        }
    }

    /// Same method, generating keys of `key_size`
    pub const fn with_key_size(mut self, key_size: RsaKeySize) -> Self {
        self.key_size = key_size;
        self
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    pub fn key_size(&self) -> RsaKeySize {
        self.key_size
    }

    fn encoding(&self) -> &'static dyn RsaEncoding {
        match self.hash {
            HashAlgorithm::Sha256 => &signature::RSA_PKCS1_SHA256,
            HashAlgorithm::Sha384 => &signature::RSA_PKCS1_SHA384,
            HashAlgorithm::Sha512 => &signature::RSA_PKCS1_SHA512,
        }
    }

    fn verification(&self) -> &'static dyn signature::VerificationAlgorithm {
        match self.hash {
            HashAlgorithm::Sha256 => &signature::RSA_PKCS1_2048_8192_SHA256,
            HashAlgorithm::Sha384 => &signature::RSA_PKCS1_2048_8192_SHA384,
            HashAlgorithm::Sha512 => &signature::RSA_PKCS1_2048_8192_SHA512,
        }
    }
}

impl SigningMethod for RsaMethod {
    fn name(&self) -> &str {
        self.name
    }

    fn generate_key_pair(&self) -> Result<KeyPair> {
        generate_rsa(self.name, self.key_size)
    }

    fn sign(&self, signing_input: &str, key: &PrivateKey) -> Result<String> {
        sign_rsa(self.name, signing_input, key, self.encoding())
    }

    fn verify(&self, signing_input: &str, signature: &str, key: &PublicKey) -> Result<()> {
        verify_rsa(self.name, signing_input, signature, key, self.verification())
    }
}

/// Generate an RSA key pair of `key_size`
pub(crate) fn generate_rsa(method: &str, key_size: RsaKeySize) -> Result<KeyPair> {
    let key_pair = RsaKeyPair::generate(key_size.backend()).map_err(|_| {
        Error::Crypto(format!(
            "{method}: RSA-{} key generation failed",
            key_size.bits()
        ))
    })?;
    Ok(KeyPair::from_private_key(PrivateKey::Rsa(
        RsaPrivateKey::from_key_pair(key_pair),
    )))
}

/// Generic RSA signing; the padding scheme decides PKCS#1 v1.5 or PSS
pub(crate) fn sign_rsa(
    method: &str,
    signing_input: &str,
    key: &PrivateKey,
    encoding: &'static dyn RsaEncoding,
) -> Result<String> {
    let rsa_key = key.as_rsa(method)?;
    let mut signature = vec![0u8; rsa_key.modulus_len()];
    rsa_key
        .key_pair()
        .sign(
            encoding,
            &SystemRandom::new(),
            signing_input.as_bytes(),
            &mut signature,
        )
        .map_err(|_| Error::Crypto(format!("{method}: RSA signing failed")))?;
    Ok(base64url::encode_bytes(&signature))
}

/// Generic RSA signature verification
pub(crate) fn verify_rsa(
    method: &str,
    signing_input: &str,
    signature: &str,
    key: &PublicKey,
    algorithm: &'static dyn signature::VerificationAlgorithm,
) -> Result<()> {
    let rsa_key = key.as_rsa(method)?;
    let signature_bytes = base64url::decode_bytes(signature, MAX_DECODED_SIGNATURE_SIZE)?;

    UnparsedPublicKey::new(algorithm, rsa_key.as_der())
        .verify(signing_input.as_bytes(), &signature_bytes)
        .map_err(|_| Error::SignatureInvalid)
}
