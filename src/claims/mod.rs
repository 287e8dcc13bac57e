mod map;
mod numeric_date;
mod validator;

pub use map::MapClaims;
pub use numeric_date::NumericDate;
pub use validator::ClaimsValidation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of reading one claim
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClaimError {
    /// The claim is deliberately not checked; validation treats it as passing
    #[error("claim validation skipped")]
    Skip,

    #[error("claim '{0}' is missing")]
    Missing(String),

    #[error("claim '{claim}' has the wrong type, expected {expected}")]
    InvalidType {
        claim: String,
        expected: &'static str,
    },

    /// Failure reported by a custom claims hook
    #[error("{0}")]
    Custom(String),
}

impl ClaimError {
    pub fn custom(message: impl Into<String>) -> Self {
        ClaimError::Custom(message.into())
    }
}

pub type ClaimResult<T> = std::result::Result<T, ClaimError>;

/// Read access to the registered claims of a token
///
/// Each accessor reports [`ClaimError::Missing`] when the claim is absent,
/// or [`ClaimError::Skip`] to opt that claim out of validation entirely.
///
/// [`as_custom`](Self::as_custom) has no default: a type implementing
/// [`CustomClaimsSet`] must return `Some(self)` there or its hook never runs.
pub trait ClaimsSet {
    fn issuer(&self) -> ClaimResult<&str>;
    fn subject(&self) -> ClaimResult<&str>;
    fn audience(&self) -> ClaimResult<&str>;
    fn expiration(&self) -> ClaimResult<NumericDate>;
    fn not_before(&self) -> ClaimResult<NumericDate>;
    fn issued_at(&self) -> ClaimResult<NumericDate>;
    fn jwt_id(&self) -> ClaimResult<&str>;

    /// The custom validation hook, `None` for plain claims types
    fn as_custom(&self) -> Option<&dyn CustomClaimsSet>;
}

/// Claims with application-specific validation
///
/// Returning `Err(ClaimError::Skip)` from [`validate`](Self::validate) means
/// "no objection", same as `Ok(())`.
pub trait CustomClaimsSet: ClaimsSet {
    fn validate(&self) -> ClaimResult<()>;
}

/// Standard JWT claims as defined in RFC 7519 Section 4.1
///
/// Absent fields are left out of the encoded payload. Embed this with
/// `#[serde(flatten)]` in an application claims struct and forward the
/// accessors with [`impl_claims_set!`](crate::impl_claims_set).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredClaims {
    /// Issuer (iss) - identifies the principal that issued the token
    #[serde(rename = "iss", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Subject (sub) - identifies the principal that is the subject of the token
    #[serde(rename = "sub", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Audience (aud) - the single recipient the token is intended for
    #[serde(rename = "aud", default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    /// Expiration Time (exp)
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<NumericDate>,

    /// Not Before (nbf)
    #[serde(rename = "nbf", default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<NumericDate>,

    /// Issued At (iat)
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<NumericDate>,

    /// JWT ID (jti) - unique identifier for the token
    #[serde(rename = "jti", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

fn present<'a, T: ?Sized>(value: Option<&'a T>, name: &str) -> ClaimResult<&'a T> {
    value.ok_or_else(|| ClaimError::Missing(name.to_string()))
}

impl ClaimsSet for RegisteredClaims {
    fn issuer(&self) -> ClaimResult<&str> {
        present(self.issuer.as_deref(), "iss")
    }

    fn subject(&self) -> ClaimResult<&str> {
        present(self.subject.as_deref(), "sub")
    }

    fn audience(&self) -> ClaimResult<&str> {
        present(self.audience.as_deref(), "aud")
    }

    fn expiration(&self) -> ClaimResult<NumericDate> {
        present(self.expires_at.as_ref(), "exp").copied()
    }

    fn not_before(&self) -> ClaimResult<NumericDate> {
        present(self.not_before.as_ref(), "nbf").copied()
    }

    fn issued_at(&self) -> ClaimResult<NumericDate> {
        present(self.issued_at.as_ref(), "iat").copied()
    }

    fn jwt_id(&self) -> ClaimResult<&str> {
        present(self.id.as_deref(), "jti")
    }

    fn as_custom(&self) -> Option<&dyn CustomClaimsSet> {
        None
    }
}

/// Implement [`ClaimsSet`] for a struct by forwarding to one of its fields
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct AppClaims {
///     #[serde(flatten)]
///     registered: RegisteredClaims,
///     role: String,
/// }
///
/// impl_claims_set!(AppClaims, registered);
/// ```
///
/// Add `, custom` to also expose the type's [`CustomClaimsSet`] hook:
/// `impl_claims_set!(AppClaims, registered, custom);`
#[macro_export]
macro_rules! impl_claims_set {
    (@forward $field:ident) => {
        fn issuer(&self) -> $crate::ClaimResult<&str> {
            $crate::ClaimsSet::issuer(&self.$field)
        }
        fn subject(&self) -> $crate::ClaimResult<&str> {
            $crate::ClaimsSet::subject(&self.$field)
        }
        fn audience(&self) -> $crate::ClaimResult<&str> {
            $crate::ClaimsSet::audience(&self.$field)
        }
        fn expiration(&self) -> $crate::ClaimResult<$crate::NumericDate> {
            $crate::ClaimsSet::expiration(&self.$field)
        }
        fn not_before(&self) -> $crate::ClaimResult<$crate::NumericDate> {
            $crate::ClaimsSet::not_before(&self.$field)
        }
        fn issued_at(&self) -> $crate::ClaimResult<$crate::NumericDate> {
            $crate::ClaimsSet::issued_at(&self.$field)
        }
        fn jwt_id(&self) -> $crate::ClaimResult<&str> {
            $crate::ClaimsSet::jwt_id(&self.$field)
        }
    };
    ($claims:ty, $field:ident) => {
        impl $crate::ClaimsSet for $claims {
            $crate::impl_claims_set!(@forward $field);

            fn as_custom(&self) -> ::std::option::Option<&dyn $crate::CustomClaimsSet> {
                ::std::option::Option::None
            }
        }
    };
    ($claims:ty, $field:ident, custom) => {
        impl $crate::ClaimsSet for $claims {
            $crate::impl_claims_set!(@forward $field);

            fn as_custom(&self) -> ::std::option::Option<&dyn $crate::CustomClaimsSet> {
                ::std::option::Option::Some(self)
            }
        }
    };
}
