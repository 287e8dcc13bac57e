//! Edge case tests for token parsing and validation
//!
//! Time boundaries, error aggregation, empty and unusual claims, and custom
//! claims types.

use std::sync::Arc;
use std::time::Duration;

use jwtsmith::algorithm::hmac::HS256;
use jwtsmith::*;
use serde::{Deserialize, Serialize};

const SECRET: &str = "edge-case-secret";
const NOW: NumericDate = NumericDate::from_unix(1_700_000_000);

fn sign<C: Serialize + ?Sized>(claims: &C) -> RawToken {
    new_token(&HS256, Some(claims), &PrivateKey::hmac(SECRET)).unwrap()
}

fn validator() -> Validator {
    Validator::new(Arc::new(HS256))
}

fn validate_at(validator: &Validator, raw: RawToken) -> Result<Token<MapClaims>> {
    validator.validate_token_at(raw, &PublicKey::hmac(SECRET), NOW)
}

fn inner_kinds(err: &Error) -> Vec<ErrorKind> {
    match err {
        Error::Validation(errors) => errors.iter().map(Error::kind).collect(),
        other => vec![other.kind()],
    }
}

// ============================================================================
// Time Boundaries
// ============================================================================

#[test]
fn test_expired_one_second_ago() {
    let raw = sign(&MapClaims::new().with("exp", NOW - Duration::from_secs(1)));

    let err = validate_at(&validator(), raw.clone()).unwrap_err();
    assert_eq!(inner_kinds(&err), [ErrorKind::TokenExpired]);

    let lenient = validator().margin(Duration::from_secs(2));
    assert!(validate_at(&lenient, raw).is_ok());
}

#[test]
fn test_expired_error_details() {
    let exp = NOW - Duration::from_secs(10);
    let raw = sign(&MapClaims::new().with("exp", exp));
    let err = validate_at(&validator().margin(Duration::from_secs(5)), raw).unwrap_err();

    let Error::Validation(errors) = err else {
        panic!("expected aggregated errors");
    };
    assert_eq!(
        errors.into_vec(),
        [Error::TokenExpired {
            expired_at: Some(exp.as_unix()),
            now: NOW.as_unix(),
            margin: 5,
        }]
    );
}

#[test]
fn test_not_before_is_inclusive() {
    let raw = sign(&MapClaims::new().with("nbf", NOW));
    assert!(validate_at(&validator(), raw).is_ok());

    let raw = sign(&MapClaims::new().with("nbf", NOW + Duration::from_secs(1)));
    let err = validate_at(&validator(), raw).unwrap_err();
    assert_eq!(inner_kinds(&err), [ErrorKind::TokenNotValidYet]);
}

#[test]
fn test_issued_in_future_only_with_iat_check() {
    let raw = sign(&MapClaims::new().with("iat", NOW + Duration::from_secs(120)));
    assert!(validate_at(&validator(), raw.clone()).is_ok());

    let err = validate_at(&validator().validate_iat(true), raw.clone()).unwrap_err();
    assert_eq!(inner_kinds(&err), [ErrorKind::TokenUsedBeforeIssued]);

    let lenient = validator().validate_iat(true).margin(Duration::from_secs(120));
    assert!(validate_at(&lenient, raw).is_ok());
}

#[test]
fn test_fractional_dates() {
    // 1.5s in the past floors to a whole second
    let exp = NOW.as_unix() as f64 - 1.5;
    let raw = sign(&MapClaims::new().with("exp", exp));
    let token = validate_at(&validator().margin(Duration::from_secs(3)), raw.clone()).unwrap();
    assert_eq!(token.claims().expiration().unwrap(), NumericDate::from_unix(NOW.as_unix() - 2));

    assert!(validate_at(&validator().margin(Duration::from_secs(2)), raw).is_err());
}

#[test]
fn test_sub_second_margin_is_ignored() {
    let raw = sign(&MapClaims::new().with("exp", NOW));
    let err = validate_at(&validator().margin(Duration::from_millis(900)), raw).unwrap_err();
    assert_eq!(inner_kinds(&err), [ErrorKind::TokenExpired]);
}

#[test]
fn test_time_claim_of_wrong_type() {
    let raw = sign(&MapClaims::new().with("nbf", "tomorrow"));
    let err = validate_at(&validator(), raw).unwrap_err();
    let Error::Validation(errors) = &err else {
        panic!("expected aggregated errors, got {err:?}");
    };
    assert!(matches!(
        errors.iter().next(),
        Some(Error::TokenNotValidYet { not_before: None, .. })
    ));
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_all_failures_reported_together() {
    let raw = sign(
        &MapClaims::new()
            .with("aud", "somebody-else")
            .with("iss", "elsewhere")
            .with("exp", NOW - Duration::from_secs(60))
            .with("nbf", NOW + Duration::from_secs(60)),
    );
    let validator = validator()
        .expected_audience("api")
        .expected_issuer("me")
        .expected_subject("alice");

    let err = validator
        .validate_token_at::<MapClaims>(raw, &PublicKey::hmac("wrong-secret"), NOW)
        .unwrap_err();
    assert_eq!(
        inner_kinds(&err),
        [
            ErrorKind::TokenExpired,
            ErrorKind::TokenNotValidYet,
            ErrorKind::TokenInvalidAudience,
            ErrorKind::TokenInvalidIssuer,
            ErrorKind::TokenInvalidSubject,
            ErrorKind::TokenSignatureInvalid,
        ]
    );

    let message = err.to_string();
    assert!(message.contains("; "), "joined message: {message}");
}

#[test]
fn test_audience_and_expiry_both_reported() {
    let raw = sign(
        &MapClaims::new()
            .with("aud", "web")
            .with("exp", NOW - Duration::from_secs(1)),
    );
    let err = validate_at(&validator().expected_audience("api"), raw).unwrap_err();

    assert!(err.is(ErrorKind::TokenExpired));
    assert!(err.is(ErrorKind::TokenInvalidAudience));
    assert!(!err.is(ErrorKind::TokenSignatureInvalid));
}

#[test]
fn test_audience_array_is_not_accepted() {
    let raw = sign(&MapClaims::new().with("aud", serde_json::json!(["api", "web"])));
    let err = validate_at(&validator().expected_audience("api"), raw).unwrap_err();
    assert_eq!(
        inner_kinds(&err),
        [ErrorKind::TokenInvalidAudience]
    );
}

// ============================================================================
// Empty and Unusual Claims
// ============================================================================

#[test]
fn test_no_claims_produces_empty_object() {
    let raw = new_token(&HS256, None::<&MapClaims>, &PrivateKey::hmac(SECRET)).unwrap();
    let payload = raw.as_str().split('.').nth(1).unwrap();
    assert_eq!(jwtsmith::utils::base64url::decode_string(payload, 64).unwrap(), "{}");

    let token = validate_at(&validator(), raw).unwrap();
    assert!(token.claims().is_empty());
}

#[test]
fn test_unit_claims_produce_empty_object() {
    let raw = sign(&());
    let payload = raw.as_str().split('.').nth(1).unwrap();
    assert_eq!(jwtsmith::utils::base64url::decode_string(payload, 64).unwrap(), "{}");
}

#[test]
fn test_non_object_claims_rejected() {
    let err = new_token(&HS256, Some(&vec![1, 2, 3]), &PrivateKey::hmac(SECRET)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ClaimsEncoding);
}

#[test]
fn test_payload_not_an_object_is_malformed() {
    let header = jwtsmith::utils::base64url::encode(r#"{"alg":"HS256"}"#);
    let payload = jwtsmith::utils::base64url::encode("[1,2,3]");
    let err = validate_at(&validator(), RawToken::new(format!("{header}.{payload}.c2ln")))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenMalformed);
}

#[test]
fn test_registered_claims_omit_absent_fields() {
    let claims = RegisteredClaims {
        subject: Some("alice".to_string()),
        ..Default::default()
    };
    let raw = sign(&claims);
    let payload = raw.as_str().split('.').nth(1).unwrap();
    assert_eq!(
        jwtsmith::utils::base64url::decode_string(payload, 64).unwrap(),
        r#"{"sub":"alice"}"#
    );
}

#[test]
fn test_malformed_segments() {
    let cases = [
        "",
        "abc",
        "a.b",
        "a.b.c.d",
        "!!!.e30.c2ln",
        "e30.!!!.c2ln",
        "bm90IGpzb24.e30.c2ln",
    ];
    for case in cases {
        let err = validate_at(&validator(), RawToken::from(case)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TokenMalformed, "case {case:?}");
    }
}

#[test]
fn test_unicode_claims_survive() {
    let raw = sign(&MapClaims::new().with("name", "Zoë 🚀 名前"));
    let token = validate_at(&validator(), raw).unwrap();
    assert_eq!(token.claims().get("name").unwrap(), "Zoë 🚀 名前");
}

// ============================================================================
// Custom Claims
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct AppClaims {
    #[serde(flatten)]
    registered: RegisteredClaims,
    role: String,
    #[serde(default)]
    scopes: Vec<String>,
}

impl CustomClaimsSet for AppClaims {
    fn validate(&self) -> ClaimResult<()> {
        if self.role == "banned" {
            return Err(ClaimError::custom("role is banned"));
        }
        Ok(())
    }
}

impl_claims_set!(AppClaims, registered, custom);

fn app_claims(role: &str) -> AppClaims {
    AppClaims {
        registered: RegisteredClaims {
            issuer: Some("me".to_string()),
            expires_at: Some(NOW + Duration::from_secs(60)),
            ..Default::default()
        },
        role: role.to_string(),
        scopes: vec!["read".to_string()],
    }
}

#[test]
fn test_custom_claims_round_trip() {
    let claims = app_claims("editor");
    let token: Token<AppClaims> = validator()
        .expected_issuer("me")
        .validate_token_at(sign(&claims), &PublicKey::hmac(SECRET), NOW)
        .unwrap();
    assert_eq!(token.claims(), &claims);
}

#[test]
fn test_custom_claims_hook_runs() {
    let err = validator()
        .validate_token_at::<AppClaims>(sign(&app_claims("banned")), &PublicKey::hmac(SECRET), NOW)
        .unwrap_err();
    assert_eq!(
        inner_kinds(&err),
        [ErrorKind::TokenInvalidCustomClaims]
    );
}

#[test]
fn test_map_claims_decode_into_custom_type() {
    let token = validate_at(&validator(), sign(&app_claims("editor"))).unwrap();
    let typed: AppClaims = token.into_claims().into_typed().unwrap();
    assert_eq!(typed, app_claims("editor"));
}

/// Claims type with both traits written out by hand, no macro
#[derive(Debug, Serialize, Deserialize)]
struct SuspendedClaims {
    #[serde(flatten)]
    registered: RegisteredClaims,
}

impl ClaimsSet for SuspendedClaims {
    fn issuer(&self) -> ClaimResult<&str> {
        self.registered.issuer()
    }
    fn subject(&self) -> ClaimResult<&str> {
        self.registered.subject()
    }
    fn audience(&self) -> ClaimResult<&str> {
        self.registered.audience()
    }
    fn expiration(&self) -> ClaimResult<NumericDate> {
        self.registered.expiration()
    }
    fn not_before(&self) -> ClaimResult<NumericDate> {
        self.registered.not_before()
    }
    fn issued_at(&self) -> ClaimResult<NumericDate> {
        self.registered.issued_at()
    }
    fn jwt_id(&self) -> ClaimResult<&str> {
        self.registered.jwt_id()
    }
    fn as_custom(&self) -> Option<&dyn CustomClaimsSet> {
        Some(self)
    }
}

impl CustomClaimsSet for SuspendedClaims {
    fn validate(&self) -> ClaimResult<()> {
        Err(ClaimError::custom("account suspended"))
    }
}

#[test]
fn test_hand_written_custom_claims_hook_rejects() {
    let manager = TokenManager::generate(Arc::new(HS256)).unwrap();
    let raw = manager
        .generate_token(Some(&RegisteredClaims {
            subject: Some("alice".to_string()),
            ..Default::default()
        }))
        .unwrap();

    let err = manager.validate_token_as::<SuspendedClaims>(raw.clone()).unwrap_err();
    assert!(err.is(ErrorKind::TokenInvalidCustomClaims));
    assert_eq!(inner_kinds(&err), [ErrorKind::TokenInvalidCustomClaims]);

    // The same token is fine for a claims type without a hook
    assert!(manager.validate_token_as::<RegisteredClaims>(raw).is_ok());
}

/// Claims type that opts out of the subject check entirely
#[derive(Debug, Serialize, Deserialize)]
struct ServiceClaims {
    #[serde(flatten)]
    registered: RegisteredClaims,
}

impl ClaimsSet for ServiceClaims {
    fn issuer(&self) -> ClaimResult<&str> {
        self.registered.issuer()
    }
    fn subject(&self) -> ClaimResult<&str> {
        Err(ClaimError::Skip)
    }
    fn audience(&self) -> ClaimResult<&str> {
        self.registered.audience()
    }
    fn expiration(&self) -> ClaimResult<NumericDate> {
        self.registered.expiration()
    }
    fn not_before(&self) -> ClaimResult<NumericDate> {
        self.registered.not_before()
    }
    fn issued_at(&self) -> ClaimResult<NumericDate> {
        self.registered.issued_at()
    }
    fn jwt_id(&self) -> ClaimResult<&str> {
        self.registered.jwt_id()
    }
    fn as_custom(&self) -> Option<&dyn CustomClaimsSet> {
        None
    }
}

#[test]
fn test_skipped_claim_passes_expectation() {
    let raw = sign(&MapClaims::new().with("sub", "someone-else"));
    let result = validator()
        .expected_subject("alice")
        .validate_token_at::<ServiceClaims>(raw, &PublicKey::hmac(SECRET), NOW);
    assert!(result.is_ok(), "{result:?}");
}
