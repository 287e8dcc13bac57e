//! One-stop token issuing and checking
//!
//! A [`TokenManager`] owns a signing method, the key pair for it, and a
//! [`Validator`] configured with the usual defaults: one minute of clock skew
//! margin, no issued-at check, no audience/issuer/subject expectations.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::algorithm::{Registry, SigningMethod};
use crate::claims::{ClaimsSet, MapClaims};
use crate::error::Result;
use crate::keys::KeyPair;
use crate::token::{RawToken, Token, new_token};
use crate::validator::Validator;

/// Clock skew margin a new manager validates with
pub const DEFAULT_MARGIN: Duration = Duration::from_secs(60);

/// Cookie consulted when a request carries no bearer token
pub const DEFAULT_COOKIE_NAME: &str = "token";

/// Issues and validates tokens for one signing method and key pair
#[derive(Debug, Clone)]
pub struct TokenManager {
    method: Arc<dyn SigningMethod>,
    keys: KeyPair,
    validator: Validator,
    cookie_name: String,
}

impl TokenManager {
    pub fn new(method: Arc<dyn SigningMethod>, keys: KeyPair) -> Self {
        let validator = Validator::new(Arc::clone(&method)).margin(DEFAULT_MARGIN);
        Self {
            method,
            keys,
            validator,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
        }
    }

    /// Manager with a freshly generated key pair for `method`
    pub fn generate(method: Arc<dyn SigningMethod>) -> Result<Self> {
        let keys = method.generate_key_pair()?;
        Ok(Self::new(method, keys))
    }

    /// Adjust validation settings
    ///
    /// ```ignore
    /// let manager = TokenManager::new(Arc::new(RS512), keys)
    ///     .configure_validator(|v| v.expected_issuer("me").margin(Duration::from_secs(300)));
    /// ```
    pub fn configure_validator(mut self, configure: impl FnOnce(Validator) -> Validator) -> Self {
        self.validator = configure(self.validator);
        self
    }

    /// Resolve header algorithms through `registry`
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.validator = self.validator.with_registry(registry);
        self
    }

    /// Read request tokens from the cookie called `name` instead of `token`
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn method(&self) -> &Arc<dyn SigningMethod> {
        &self.method
    }

    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Sign `claims`; `None` produces a token with an empty claims object
    pub fn generate_token<C: Serialize + ?Sized>(&self, claims: Option<&C>) -> Result<RawToken> {
        let token = new_token(self.method.as_ref(), claims, self.keys.private_key())?;
        tracing::debug!(alg = self.method.name(), "issued token");
        Ok(token)
    }

    /// Fully validate `raw`, decoding claims as a [`MapClaims`]
    pub fn validate_token(&self, raw: impl Into<RawToken>) -> Result<Token<MapClaims>> {
        self.validate_token_as(raw)
    }

    /// Fully validate `raw`, decoding claims as `C`
    pub fn validate_token_as<C>(&self, raw: impl Into<RawToken>) -> Result<Token<C>>
    where
        C: ClaimsSet + DeserializeOwned,
    {
        self.validator.validate_token(raw, self.keys.public_key())
    }

    /// Validate the token carried by `headers`
    ///
    /// The bearer header is used when present, otherwise the manager's
    /// cookie. With neither, fails with `NoCookieFound`.
    #[cfg(feature = "http")]
    pub fn validate_token_from_headers(&self, headers: &http::HeaderMap) -> Result<Token<MapClaims>> {
        let raw = crate::request::extract_token(headers, &self.cookie_name).inspect_err(|e| {
            tracing::debug!(error = %e, "no token in request");
        })?;
        self.validate_token(raw)
    }

    /// Validate the token carried by `request`; see [`validate_token_from_headers`](Self::validate_token_from_headers)
    #[cfg(feature = "http")]
    pub fn validate_token_from_request<B>(
        &self,
        request: &http::Request<B>,
    ) -> Result<Token<MapClaims>> {
        self.validate_token_from_headers(request.headers())
    }
}
