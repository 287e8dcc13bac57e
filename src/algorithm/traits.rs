use std::fmt;

use crate::error::Result;
use crate::keys::{KeyPair, PrivateKey, PublicKey};

/// Core trait that all token signing methods implement
///
/// A method owns one algorithm name (the `alg` header value) and one hash
/// configuration. Implementations are immutable and shared behind `Arc`
/// between registries, validators and managers.
pub trait SigningMethod: fmt::Debug + Send + Sync {
    /// The algorithm identifier (e.g., "HS256", "RS256")
    fn name(&self) -> &str;

    /// Generate a fresh key pair suitable for this method
    fn generate_key_pair(&self) -> Result<KeyPair>;

    /// Sign `signing_input` (header.payload) and return the Base64URL signature
    fn sign(&self, signing_input: &str, key: &PrivateKey) -> Result<String>;

    /// Verify a signature
    ///
    /// # Arguments
    /// * `signing_input` - The data that was signed (header.payload)
    /// * `signature` - The Base64URL-encoded signature
    /// * `key` - The key to use for verification
    fn verify(&self, signing_input: &str, signature: &str, key: &PublicKey) -> Result<()>;
}
