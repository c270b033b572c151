//! Raw powerstat values and their numeric normalization.
//!
//! Hero records come from an external snapshot and their powerstats are not
//! guaranteed to be clean: a value may be a number, a numeric string, `null`,
//! absent, or garbage. [`StatValue`] captures that shape explicitly and
//! [`StatValue::safe_numeric`] is the one place where it becomes a [`Score`].

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest magnitude at which every integral `f64` is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A raw powerstat value as found in a hero record.
///
/// # Examples
///
/// ```
/// use heroclash::{Score, StatValue};
///
/// assert_eq!(StatValue::from(serde_json::json!(42)).safe_numeric(), Score::new(42.0));
/// assert_eq!(StatValue::from(serde_json::json!("17")).safe_numeric(), Score::new(17.0));
/// assert_eq!(StatValue::from(serde_json::json!("invalid")).safe_numeric(), Score::ZERO);
/// assert_eq!(StatValue::Missing.safe_numeric(), Score::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum StatValue {
    /// A JSON number.
    Number(f64),
    /// A JSON string, coerced on read.
    Text(String),
    /// `null` or an absent key.
    Missing,
    /// Anything else (booleans, arrays, objects).
    Invalid(serde_json::Value),
}

impl StatValue {
    /// Reads this value as a score, defaulting to zero.
    ///
    /// Numbers pass through when finite. Strings are trimmed and parsed as
    /// plain decimal floats (no locale handling, no hex). Missing values,
    /// non-finite results and anything unparsable read as `0`.
    #[must_use]
    pub fn safe_numeric(&self) -> Score {
        self.score().unwrap_or(Score::ZERO)
    }

    /// True for `null` or an absent key.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// True when `safe_numeric` had to fall back to zero for this value.
    #[must_use]
    pub fn is_defaulted(&self) -> bool {
        self.score().is_none()
    }

    /// The readable score, if any. `None` means the value defaults to zero.
    fn score(&self) -> Option<Score> {
        let raw = match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => parse_decimal(s),
            Self::Missing | Self::Invalid(_) => None,
        };
        raw.and_then(Score::try_new)
    }

    /// Returns a human-readable type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Missing => "missing",
            Self::Invalid(_) => "invalid",
        }
    }
}

fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    // Rust's float parser also accepts "inf"/"nan" spellings; `Score::try_new`
    // rejects their non-finite results.
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

impl Default for StatValue {
    fn default() -> Self {
        Self::Missing
    }
}

impl From<serde_json::Value> for StatValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;

        match v {
            Value::Null => Self::Missing,
            Value::Number(n) => n.as_f64().map_or(Self::Invalid(Value::Number(n)), Self::Number),
            Value::String(s) => Self::Text(s),
            other => Self::Invalid(other),
        }
    }
}

impl From<StatValue> for serde_json::Value {
    fn from(v: StatValue) -> Self {
        match v {
            StatValue::Number(n) => Score::try_new(n)
                .and_then(|score| serde_json::to_value(score).ok())
                .unwrap_or(Self::Null),
            StatValue::Text(s) => Self::String(s),
            StatValue::Missing => Self::Null,
            StatValue::Invalid(raw) => raw,
        }
    }
}

impl From<i64> for StatValue {
    fn from(v: i64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self::Number(v as f64)
    }
}

impl From<u8> for StatValue {
    fn from(v: u8) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for StatValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Option<i64>> for StatValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Self::Missing, Self::from)
    }
}

/// A normalized, always-finite powerstat value.
///
/// Serializes as a JSON integer when the value is integral and as a float
/// otherwise, so clean snapshot data round-trips unchanged.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Score(f64);

impl Score {
    /// The score every unreadable value collapses to.
    pub const ZERO: Self = Self(0.0);

    /// Creates a score, mapping non-finite input to zero.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self::try_new(value).unwrap_or(Self::ZERO)
    }

    /// Creates a score, returning `None` for NaN or infinities.
    #[must_use]
    pub fn try_new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    /// The underlying finite value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns the value as an integer if it is integral and exactly representable.
    #[must_use]
    pub fn as_integer(self) -> Option<i64> {
        if self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_INTEGER {
            #[allow(clippy::cast_possible_truncation)]
            Some(self.0 as i64)
        } else {
            None
        }
    }

    /// Compares two scores. Both are finite, so the ordering is total;
    /// `-0.0` and `0.0` compare equal.
    #[must_use]
    pub fn cmp_finite(self, other: Self) -> Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_integer() {
            Some(i) => write!(f, "{i}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integer() {
            Some(i) => serializer.serialize_i64(i),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Self::try_new(raw).ok_or_else(|| serde::de::Error::custom("score must be finite"))
    }
}
