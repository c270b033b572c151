//! The powerstat schema.
//!
//! Six canonical attributes are compared between heroes. Their order is part
//! of the response contract: it is the iteration order of the engine and the
//! order of `categories` in every comparison result.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::value::{Score, StatValue};

/// One of the six canonical powerstats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Powerstat {
    /// `intelligence`
    Intelligence,
    /// `strength`
    Strength,
    /// `speed`
    Speed,
    /// `durability`
    Durability,
    /// `power`
    Power,
    /// `combat`
    Combat,
}

impl Powerstat {
    /// All powerstats in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Intelligence,
        Self::Strength,
        Self::Speed,
        Self::Durability,
        Self::Power,
        Self::Combat,
    ];

    /// The canonical (lowercase) attribute name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intelligence => "intelligence",
            Self::Strength => "strength",
            Self::Speed => "speed",
            Self::Durability => "durability",
            Self::Power => "power",
            Self::Combat => "combat",
        }
    }
}

impl fmt::Display for Powerstat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Powerstat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| format!("unknown powerstat: {s:?}"))
    }
}

/// A hero's raw powerstat mapping.
///
/// Keys are kept as strings so that records carrying extra or misspelled
/// attributes still load; only the canonical six are ever compared.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct Powerstats(BTreeMap<String, StatValue>);

impl Powerstats {
    /// Creates an empty mapping; every canonical stat reads as `Missing`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for a canonical stat.
    #[must_use]
    pub fn with(mut self, stat: Powerstat, value: impl Into<StatValue>) -> Self {
        self.set(stat, value);
        self
    }

    /// Sets a canonical stat, replacing any previous value.
    pub fn set(&mut self, stat: Powerstat, value: impl Into<StatValue>) {
        self.0.insert(stat.as_str().to_string(), value.into());
    }

    /// Sets an arbitrary key, canonical or not.
    pub fn set_raw(&mut self, key: impl Into<String>, value: StatValue) {
        self.0.insert(key.into(), value);
    }

    /// Raw value for a canonical stat; absent keys read as `Missing`.
    #[must_use]
    pub fn get(&self, stat: Powerstat) -> &StatValue {
        static MISSING: StatValue = StatValue::Missing;
        self.0.get(stat.as_str()).unwrap_or(&MISSING)
    }

    /// Normalized score for a canonical stat.
    #[must_use]
    pub fn score(&self, stat: Powerstat) -> Score {
        self.get(stat).safe_numeric()
    }

    /// Canonical stats whose value had to default to zero.
    #[must_use]
    pub fn defaulted(&self) -> Vec<Powerstat> {
        Powerstat::ALL
            .into_iter()
            .filter(|stat| self.get(*stat).is_defaulted())
            .collect()
    }

    /// Number of keys present, canonical or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no keys are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<[u8; 6]> for Powerstats {
    /// Builds a full mapping from values in canonical order.
    fn from(values: [u8; 6]) -> Self {
        Powerstat::ALL
            .into_iter()
            .zip(values)
            .fold(Self::new(), |stats, (stat, v)| stats.with(stat, v))
    }
}

impl Serialize for Powerstats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for stat in Powerstat::ALL {
            if let Some(v) = self.0.get(stat.as_str()) {
                map.serialize_entry(stat.as_str(), v)?;
            }
        }
        for (k, v) in &self.0 {
            if k.parse::<Powerstat>().is_err() {
                map.serialize_entry(k, v)?;
            }
        }
        map.end()
    }
}
