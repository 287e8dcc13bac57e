use crate::algorithm::{HashAlgorithm, SigningMethod};
use crate::error::{Error, Result};
use crate::keys::{KeyPair, PrivateKey, PublicKey, SymmetricKey};
use crate::limits::MAX_DECODED_SIGNATURE_SIZE;
use crate::utils::base64url;

use aws_lc_rs::rand::{SecureRandom, SystemRandom};
use constant_time_eq::constant_time_eq;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HMAC signing method over a configurable hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HmacMethod {
    name: &'static str,
    hash: HashAlgorithm,
}

/// HS256 method (HMAC with SHA-256)
pub const HS256: HmacMethod = HmacMethod::new("HS256", HashAlgorithm::Sha256);

/// HS384 method (HMAC with SHA-384)
pub const HS384: HmacMethod = HmacMethod::new("HS384", HashAlgorithm::Sha384);

/// HS512 method (HMAC with SHA-512)
pub const HS512: HmacMethod = HmacMethod::new("HS512", HashAlgorithm::Sha512);

impl HmacMethod {
    pub const fn new(name: &'static str, hash: HashAlgorithm) -> Self {
        Self { name, hash }
    }

    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    fn compute(&self, secret: &[u8], signing_input: &str) -> Result<Vec<u8>> {
        let input = signing_input.as_bytes();
        match self.hash {
            HashAlgorithm::Sha256 => compute_mac::<Hmac<Sha256>>(secret, input),
            HashAlgorithm::Sha384 => compute_mac::<Hmac<Sha384>>(secret, input),
            HashAlgorithm::Sha512 => compute_mac::<Hmac<Sha512>>(secret, input),
        }
    }
}

impl SigningMethod for HmacMethod {
    fn name(&self) -> &str {
        self.name
    }

    /// Random secret as long as the hash output
    fn generate_key_pair(&self) -> Result<KeyPair> {
        let mut secret = vec![0u8; self.hash.output_len()];
        SystemRandom::new()
            .fill(&mut secret)
            .map_err(|_| Error::Crypto(format!("{}: random secret generation failed", self.name)))?;
        let key = SymmetricKey::new(secret);
        Ok(KeyPair::new(
            PrivateKey::Hmac(key.clone()),
            PublicKey::Hmac(key),
        ))
    }

    fn sign(&self, signing_input: &str, key: &PrivateKey) -> Result<String> {
        let secret = key.as_hmac(self.name)?;
        let mac = self.compute(secret.as_bytes(), signing_input)?;
        Ok(base64url::encode_bytes(&mac))
    }

    /// Recompute and compare in constant time
    fn verify(&self, signing_input: &str, signature: &str, key: &PublicKey) -> Result<()> {
        let secret = key.as_hmac(self.name)?;
        let provided_signature = base64url::decode_bytes(signature, MAX_DECODED_SIGNATURE_SIZE)?;
        let expected_signature = self.compute(secret.as_bytes(), signing_input)?;

        if provided_signature.len() != expected_signature.len() {
            return Err(Error::SignatureInvalid);
        }

        if constant_time_eq(&provided_signature, &expected_signature) {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}

fn compute_mac<M: Mac + KeyInit>(secret: &[u8], input: &[u8]) -> Result<Vec<u8>> {
    // HMAC accepts keys of any length, so this only fails on a broken backend
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|e| Error::Crypto(format!("HMAC key rejected: {e}")))?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}
