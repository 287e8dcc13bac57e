use crate::algorithm::rsa::{RsaKeySize, generate_rsa, sign_rsa, verify_rsa};
use crate::algorithm::{HashAlgorithm, SigningMethod};
use crate::error::Result;
use crate::keys::{KeyPair, PrivateKey, PublicKey};

use aws_lc_rs::signature::{self, RsaEncoding};

/// RSA-PSS signing method; salt length equals the hash length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaPssMethod {
    name: &'static str,
    hash: HashAlgorithm,
    key_size: RsaKeySize,
}

/// PS256 method (RSA-PSS with SHA-256)
pub const PS256: RsaPssMethod = RsaPssMethod::new("PS256", HashAlgorithm::Sha256);

/// PS384 method (RSA-PSS with SHA-384)
pub const PS384: RsaPssMethod = RsaPssMethod::new("PS384", HashAlgorithm::Sha384);

/// PS512 method (RSA-PSS with SHA-512)
pub const PS512: RsaPssMethod = RsaPssMethod::new("PS512", HashAlgorithm::Sha512);

impl RsaPssMethod {
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

    fn encoding(&self) -> &'static dyn RsaEncoding {
        match self.hash {
            HashAlgorithm::Sha256 => &signature::RSA_PSS_SHA256,
            HashAlgorithm::Sha384 => &signature::RSA_PSS_SHA384,
            HashAlgorithm::Sha512 => &signature::RSA_PSS_SHA512,
        }
    }

    fn verification(&self) -> &'static dyn signature::VerificationAlgorithm {
        match self.hash {
            HashAlgorithm::Sha256 => &signature::RSA_PSS_2048_8192_SHA256,
            HashAlgorithm::Sha384 => &signature::RSA_PSS_2048_8192_SHA384,
            HashAlgorithm::Sha512 => &signature::RSA_PSS_2048_8192_SHA512,
        }
    }
}

impl SigningMethod for RsaPssMethod {
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
