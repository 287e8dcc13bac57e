use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::claims::{ClaimError, ClaimResult, ClaimsSet, CustomClaimsSet, NumericDate};
use crate::error::{Error, Result};

/// Open set of claims keyed by name
///
/// Values stay as decoded JSON until an accessor asks for them, so numeric
/// dates may arrive as integers or floats. Keys are kept sorted, which makes
/// the encoded payload stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapClaims(BTreeMap<String, Value>);

impl MapClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a claim, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Decode one claim into `T`
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> ClaimResult<T> {
        let value = self
            .0
            .get(name)
            .ok_or_else(|| ClaimError::Missing(name.to_string()))?;
        T::deserialize(value).map_err(|_| ClaimError::InvalidType {
            claim: name.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Decode the whole set into a typed claims struct
    pub fn into_typed<C: DeserializeOwned>(self) -> Result<C> {
        let object: serde_json::Map<String, Value> = self.0.into_iter().collect();
        serde_json::from_value(Value::Object(object))
            .map_err(|e| Error::ClaimsEncoding(format!("claims do not fit target type: {e}")))
    }

    fn string_claim(&self, name: &str) -> ClaimResult<&str> {
        match self.0.get(name) {
            None => Err(ClaimError::Missing(name.to_string())),
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(ClaimError::InvalidType {
                claim: name.to_string(),
                expected: "string",
            }),
        }
    }

    fn date_claim(&self, name: &str) -> ClaimResult<NumericDate> {
        let invalid = || ClaimError::InvalidType {
            claim: name.to_string(),
            expected: "number",
        };
        match self.0.get(name) {
            None => Err(ClaimError::Missing(name.to_string())),
            Some(Value::Number(number)) => {
                if let Some(seconds) = number.as_i64() {
                    Ok(NumericDate::from_unix(seconds))
                } else {
                    number
                        .as_f64()
                        .map(NumericDate::from_float)
                        .ok_or_else(invalid)
                }
            }
            Some(_) => Err(invalid()),
        }
    }
}

impl ClaimsSet for MapClaims {
    fn issuer(&self) -> ClaimResult<&str> {
        self.string_claim("iss")
    }

    fn subject(&self) -> ClaimResult<&str> {
        self.string_claim("sub")
    }

    fn audience(&self) -> ClaimResult<&str> {
        self.string_claim("aud")
    }

    fn expiration(&self) -> ClaimResult<NumericDate> {
        self.date_claim("exp")
    }

    fn not_before(&self) -> ClaimResult<NumericDate> {
        self.date_claim("nbf")
    }

    fn issued_at(&self) -> ClaimResult<NumericDate> {
        self.date_claim("iat")
    }

    fn jwt_id(&self) -> ClaimResult<&str> {
        self.string_claim("jti")
    }

    fn as_custom(&self) -> Option<&dyn CustomClaimsSet> {
        None
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapClaims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, Value>> for MapClaims {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

/// Pretty-printed JSON
impl fmt::Display for MapClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
