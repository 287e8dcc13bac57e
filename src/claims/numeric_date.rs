use std::fmt;
use std::ops::{Add, Sub};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seconds since the Unix epoch, as carried by `exp`, `nbf` and `iat`
///
/// Always whole seconds. Fractional input (`1516239022.75`) is floored when
/// decoded, and adding or subtracting a [`Duration`] ignores its sub-second
/// part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumericDate(i64);

impl NumericDate {
    pub const fn from_unix(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Floor fractional seconds; out-of-range values saturate
    pub fn from_float(seconds: f64) -> Self {
        Self(seconds.floor() as i64)
    }

    /// Current time, truncated to the second
    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(since) => Self(duration_secs(since)),
            // Before the epoch: round away from zero so the result is a floor
            Err(e) => {
                let before = e.duration();
                let whole = duration_secs(before);
                if before.subsec_nanos() > 0 {
                    Self(whole.saturating_neg().saturating_sub(1))
                } else {
                    Self(whole.saturating_neg())
                }
            }
        }
    }

    pub const fn as_unix(&self) -> i64 {
        self.0
    }
}

fn duration_secs(duration: Duration) -> i64 {
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}

impl Add<Duration> for NumericDate {
    type Output = NumericDate;

    fn add(self, rhs: Duration) -> NumericDate {
        NumericDate(self.0.saturating_add(duration_secs(rhs)))
    }
}

impl Sub<Duration> for NumericDate {
    type Output = NumericDate;

    fn sub(self, rhs: Duration) -> NumericDate {
        NumericDate(self.0.saturating_sub(duration_secs(rhs)))
    }
}

impl From<SystemTime> for NumericDate {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}

impl From<NumericDate> for serde_json::Value {
    fn from(date: NumericDate) -> Self {
        serde_json::Value::from(date.0)
    }
}

impl fmt::Display for NumericDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NumericDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

struct NumericDateVisitor;

impl Visitor<'_> for NumericDateVisitor {
    type Value = NumericDate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number of seconds since the Unix epoch")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<NumericDate, E> {
        Ok(NumericDate(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<NumericDate, E> {
        Ok(NumericDate(i64::try_from(value).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<NumericDate, E> {
        if value.is_finite() {
            Ok(NumericDate::from_float(value))
        } else {
            Err(E::custom("numeric date must be finite"))
        }
    }
}

impl<'de> Deserialize<'de> for NumericDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumericDateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_float_floors() {
        assert_eq!(NumericDate::from_float(1516239022.75).as_unix(), 1516239022);
        assert_eq!(NumericDate::from_float(-1.5).as_unix(), -2);
    }

    #[test]
    fn test_duration_arithmetic_is_whole_seconds() {
        let date = NumericDate::from_unix(100);
        assert_eq!((date + Duration::from_millis(1999)).as_unix(), 101);
        assert_eq!((date - Duration::from_secs(30)).as_unix(), 70);
        assert_eq!(
            (NumericDate::from_unix(i64::MAX) + Duration::from_secs(1)).as_unix(),
            i64::MAX
        );
    }

    #[test]
    fn test_deserialize_integer_and_float() {
        let from_int: NumericDate = serde_json::from_str("1700000000").unwrap();
        let from_float: NumericDate = serde_json::from_str("1700000000.9").unwrap();
        assert_eq!(from_int, from_float);
        assert!(serde_json::from_str::<NumericDate>("\"1700000000\"").is_err());
    }

    #[test]
    fn test_serialize_as_integer() {
        let json = serde_json::to_string(&NumericDate::from_unix(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_before_epoch_floors() {
        let time = UNIX_EPOCH - Duration::from_millis(500);
        assert_eq!(NumericDate::from_system_time(time).as_unix(), -1);
    }
}
