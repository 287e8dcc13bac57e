//! Signing methods and the registry that resolves them by name

mod traits;

pub mod hmac;
pub mod registry;

#[cfg(feature = "rsa")]
pub mod rsa;

#[cfg(feature = "rsa")]
pub mod rsa_pss;

#[cfg(feature = "ecdsa")]
pub mod ecdsa;

pub use registry::Registry;
pub use traits::SigningMethod;

use std::fmt;
use std::sync::Arc;

/// Hash function a signing method is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256
    Sha256,

    /// SHA-384
    Sha384,

    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Digest size in bytes
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every signing method compiled into this build, in registration order
pub fn builtin_methods() -> Vec<Arc<dyn SigningMethod>> {
    #[allow(unused_mut)]
    let mut methods: Vec<Arc<dyn SigningMethod>> = vec![
        Arc::new(hmac::HS256),
        Arc::new(hmac::HS384),
        Arc::new(hmac::HS512),
    ];

    #[cfg(feature = "rsa")]
    {
        let rsa_methods: [Arc<dyn SigningMethod>; 6] = [
            Arc::new(rsa::RS256),
            Arc::new(rsa::RS384),
            Arc::new(rsa::RS512),
            Arc::new(rsa_pss::PS256),
            Arc::new(rsa_pss::PS384),
            Arc::new(rsa_pss::PS512),
        ];
        methods.extend(rsa_methods);
    }

    #[cfg(feature = "ecdsa")]
    {
        let ecdsa_methods: [Arc<dyn SigningMethod>; 3] = [
            Arc::new(ecdsa::ES256),
            Arc::new(ecdsa::ES384),
            Arc::new(ecdsa::ES512),
        ];
        methods.extend(ecdsa_methods);
    }

    methods
}
