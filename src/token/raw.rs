use std::fmt;

/// Compact-serialized token string, as received or produced
///
/// Not checked on construction; parsing decides whether it is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawToken(String);

impl RawToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact bytes covered by the signature: everything before the last '.'
    pub fn signing_input(&self) -> &str {
        self.0
            .rsplit_once('.')
            .map_or(self.0.as_str(), |(input, _)| input)
    }

    /// Base64URL signature segment: everything after the last '.'
    pub fn signature(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(_, signature)| signature)
    }
}

impl From<String> for RawToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for RawToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<RawToken> for String {
    fn from(token: RawToken) -> Self {
        token.0
    }
}

impl AsRef<str> for RawToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RawToken {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RawToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for RawToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
