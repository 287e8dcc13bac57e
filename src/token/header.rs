use serde::{Deserialize, Serialize};

/// Token header
///
/// Encoded as `{"typ":"JWT","alg":"..."}`; other header fields are ignored
/// when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Token type (typically "JWT")
    #[serde(rename = "typ", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: String,
}

impl TokenHeader {
    /// Header for a JWT signed with `algorithm`
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            token_type: Some("JWT".to_string()),
            algorithm: algorithm.into(),
        }
    }

    /// Get algorithm as string
    pub fn algorithm_str(&self) -> &str {
        &self.algorithm
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_field_order() {
        let json = serde_json::to_string(&TokenHeader::new("HS256")).unwrap();
        assert_eq!(json, r#"{"typ":"JWT","alg":"HS256"}"#);
    }

    #[test]
    fn test_decoding_tolerates_missing_typ_and_extra_fields() {
        let header: TokenHeader = serde_json::from_str(r#"{"alg":"ES256","kid":"k1"}"#).unwrap();
        assert_eq!(header.algorithm_str(), "ES256");
        assert_eq!(header.token_type(), None);
    }

    #[test]
    fn test_decoding_requires_alg() {
        assert!(serde_json::from_str::<TokenHeader>(r#"{"typ":"JWT"}"#).is_err());
    }
}
